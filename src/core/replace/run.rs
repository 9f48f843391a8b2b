//! Bulk replacement over a target list.
//!
//! Each target is handled on its own: a missing file or an I/O failure is
//! recorded in that target's outcome and the run moves on. Files are written
//! only when their content actually changed.

use serde::Serialize;

use super::rules::RuleSet;
use crate::error::Error;
use crate::targets::FileTarget;
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Updated,
    Unchanged,
    NotFound,
    Failed,
}

/// What happened to one target.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub target: String,
    pub path: String,
    pub status: FileStatus,
    /// Total occurrences replaced.
    pub replacements: usize,
    /// Occurrences replaced per rule, in rule order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rule_hits: Vec<usize>,
    /// SHA-256 of the content after processing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    fn new(target: &FileTarget, status: FileStatus) -> Self {
        Self {
            target: target.label.clone(),
            path: target.path.display().to_string(),
            status,
            replacements: 0,
            rule_hits: Vec::new(),
            digest: None,
            error: None,
        }
    }

    fn failed(target: &FileTarget, err: &Error, rule_hits: Vec<usize>) -> Self {
        let mut outcome = Self::new(target, FileStatus::Failed);
        outcome.replacements = rule_hits.iter().sum();
        outcome.rule_hits = rule_hits;
        outcome.error = Some(err.detail().unwrap_or(&err.message).to_string());
        outcome
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Compute outcomes without writing anything.
    pub dry_run: bool,
}

/// Outcomes for every target, in target order, plus tallies.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub outcomes: Vec<FileOutcome>,
    pub updated: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub failed: usize,
    /// Whether changes were written to disk.
    pub applied: bool,
}

impl RunResult {
    fn from_outcomes(outcomes: Vec<FileOutcome>, applied: bool) -> Self {
        let count = |status: FileStatus| outcomes.iter().filter(|o| o.status == status).count();
        let (updated, unchanged, missing, failed) = (
            count(FileStatus::Updated),
            count(FileStatus::Unchanged),
            count(FileStatus::NotFound),
            count(FileStatus::Failed),
        );

        Self {
            outcomes,
            updated,
            unchanged,
            missing,
            failed,
            applied,
        }
    }
}

/// Apply `rules` to every target in order.
pub fn process(targets: &[FileTarget], rules: &RuleSet, options: &ProcessOptions) -> RunResult {
    crate::log_status!(
        "run",
        "Applying {} rules to {} targets{}",
        rules.len(),
        targets.len(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let outcomes = targets
        .iter()
        .map(|target| process_target(target, rules, options))
        .collect();

    RunResult::from_outcomes(outcomes, !options.dry_run)
}

fn process_target(target: &FileTarget, rules: &RuleSet, options: &ProcessOptions) -> FileOutcome {
    let path = &target.path;

    if !path.exists() {
        return FileOutcome::new(target, FileStatus::NotFound);
    }

    let content = match io::read_file(path, &format!("read {}", path.display())) {
        Ok(content) => content,
        Err(err) => return FileOutcome::failed(target, &err, Vec::new()),
    };

    let applied = rules.apply(&content);

    if applied.content == content {
        let mut outcome = FileOutcome::new(target, FileStatus::Unchanged);
        outcome.replacements = applied.replacements();
        outcome.rule_hits = applied.hits;
        outcome.digest = Some(io::content_digest(&content));
        return outcome;
    }

    if !options.dry_run {
        if let Err(err) = io::write_file(path, &applied.content, &format!("write {}", path.display())) {
            return FileOutcome::failed(target, &err, applied.hits);
        }
    }

    crate::log_status!("run", "{}: {} replacements", target.label, applied.replacements());

    let mut outcome = FileOutcome::new(target, FileStatus::Updated);
    outcome.replacements = applied.replacements();
    outcome.digest = Some(io::content_digest(&applied.content));
    outcome.rule_hits = applied.hits;
    outcome
}
