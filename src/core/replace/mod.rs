//! Literal bulk replacement: apply ordered `from` → `to` rules to a list of files.
//!
//! Each file is read whole, every rule runs over the result of the previous
//! one, and the file is rewritten only when its content changed.

mod rules;
mod run;

pub use rules::{Applied, ReplacementRule, RuleSet, RuleWarning};
pub use run::{process, FileOutcome, FileStatus, ProcessOptions, RunResult};
