use clap::{ArgAction, Args};
use serde::Serialize;
use std::path::PathBuf;

use retoken::job::{self, JobInputs};
use retoken::replace::{self, ProcessOptions, RuleSet, RuleWarning, RunResult};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct RunArgs {
    /// Files to process (relative to --root; globs allowed)
    pub targets: Vec<String>,

    /// Literal replacement, repeatable; rules apply in the order given
    #[arg(
        long = "replace",
        num_args = 2,
        value_names = ["FROM", "TO"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub replace: Vec<String>,

    /// Built-in preset (see `retoken presets`)
    #[arg(long)]
    pub preset: Option<String>,

    /// Job spec: inline JSON, @file, or - for stdin
    #[arg(long, value_name = "JSON")]
    pub job: Option<String>,

    /// Base directory for relative targets (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Invert every rule and apply them in reverse order
    #[arg(long)]
    pub reverse: bool,
}

#[derive(Serialize)]
pub struct RunOutput {
    pub command: &'static str,
    pub root: String,
    pub label: String,
    pub dry_run: bool,
    pub rules: RuleSet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RuleWarning>,
    #[serde(flatten)]
    pub result: RunResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

pub fn run(args: RunArgs, _global: &GlobalArgs) -> CmdResult<RunOutput> {
    let rules = args
        .replace
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();

    let job = job::assemble(JobInputs {
        preset: args.preset,
        job: args.job,
        rules,
        targets: args.targets,
        root: args.root,
        reverse: args.reverse,
    })?;

    let warnings = job.rules.warnings();
    for warning in &warnings {
        retoken::log_status!("rules", "{}", warning.message);
    }

    let result = replace::process(
        &job.targets,
        &job.rules,
        &ProcessOptions {
            dry_run: args.dry_run,
        },
    );

    // Per-file failures are reported, not propagated.
    Ok((
        RunOutput {
            command: "run",
            root: job.root.display().to_string(),
            label: job.label,
            dry_run: args.dry_run,
            rules: job.rules,
            warnings,
            result,
            notes: job.notes,
        },
        0,
    ))
}
