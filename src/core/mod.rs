// Public modules
pub mod error;
pub mod job;
pub mod preset;
pub mod replace;
pub mod targets;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use replace::{
    process, FileOutcome, FileStatus, ProcessOptions, ReplacementRule, RuleSet, RuleWarning,
    RunResult,
};
pub use targets::FileTarget;
