//! Job assembly: merge a preset, a JSON job spec and CLI arguments into one
//! resolved target list and rule set.

use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::preset;
use crate::replace::{ReplacementRule, RuleSet};
use crate::targets::{self, FileTarget};
use crate::utils::io;

pub const DEFAULT_LABEL: &str = "Updated";

// ============================================================================
// JSON spec
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleInput>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleInput {
    pub from: String,
    pub to: String,
}

/// Read JSON spec from string, file (@path), or stdin (-).
pub fn read_json_spec_to_string(spec: &str) -> Result<String> {
    use std::io::IsTerminal;

    if spec.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(Error::validation_invalid_argument(
                "job",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        stdin
            .read_to_string(&mut buf)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(Error::validation_invalid_argument(
                "job",
                "Invalid JSON spec '@' (missing file path)",
                None,
                None,
            ));
        }

        return io::read_file(Path::new(path), &format!("read {}", path));
    }

    Ok(spec.to_string())
}

/// Parse a job spec given inline, as `@path`, or as `-` for stdin.
pub fn parse(spec: &str) -> Result<JobSpec> {
    let raw = read_json_spec_to_string(spec)?;

    serde_json::from_str(&raw).map_err(|e| {
        Error::validation_invalid_json(
            e,
            Some("parse job spec".to_string()),
            Some(raw.chars().take(200).collect::<String>()),
        )
        .with_hint(r#"Example: {"targets": ["components/Navbar.tsx"], "rules": [{"from": "dark-blue", "to": "primary"}]}"#)
    })
}

// ============================================================================
// Assembly
// ============================================================================

/// Raw inputs for one run, before resolution.
#[derive(Debug, Clone, Default)]
pub struct JobInputs {
    pub preset: Option<String>,
    /// Job spec: inline JSON, `@path`, or `-`.
    pub job: Option<String>,
    pub rules: Vec<(String, String)>,
    pub targets: Vec<String>,
    pub root: Option<PathBuf>,
    pub reverse: bool,
}

/// A fully resolved run.
#[derive(Debug, Clone)]
pub struct Job {
    pub root: PathBuf,
    pub targets: Vec<FileTarget>,
    pub rules: RuleSet,
    pub label: String,
    pub notes: Vec<String>,
}

/// Combine preset, job spec and CLI inputs, in that order.
///
/// Root precedence: CLI `root`, then the job's `root`, then the current
/// directory. When `reverse` is set the combined rule set is inverted, and
/// the preset's label and notes no longer apply.
pub fn assemble(inputs: JobInputs) -> Result<Job> {
    let mut rules = RuleSet::new();
    let mut entries: Vec<String> = Vec::new();
    let mut label: Option<String> = None;
    let mut notes: Vec<String> = Vec::new();

    if let Some(name) = inputs.preset.as_deref() {
        let preset = preset::find(name)?;
        rules.extend(preset.rule_set()?);
        entries.extend(preset.target_entries());
        if !inputs.reverse {
            label = Some(preset.label.to_string());
            notes.extend(preset.notes.iter().map(|n| n.to_string()));
        }
    }

    let mut job_root = None;
    if let Some(spec) = inputs.job.as_deref() {
        let job = parse(spec)?;
        for rule in job.rules {
            rules.push(ReplacementRule::new(rule.from, rule.to)?);
        }
        entries.extend(job.targets);
        if job.label.is_some() {
            label = job.label;
        }
        notes.extend(job.notes);
        job_root = job.root.map(|r| PathBuf::from(shellexpand::tilde(&r).into_owned()));
    }

    rules.extend(RuleSet::from_pairs(inputs.rules)?);
    entries.extend(inputs.targets);

    let mut missing = Vec::new();
    if rules.is_empty() {
        missing.push("rules".to_string());
    }
    if entries.is_empty() {
        missing.push("targets".to_string());
    }
    if !missing.is_empty() {
        return Err(Error::validation_missing_argument(missing)
            .with_hint("Pass --preset, --job, or --replace FROM TO with one or more target files"));
    }

    if inputs.reverse {
        rules = rules.reversed()?;
    }

    let root = match inputs.root.or(job_root) {
        Some(root) => root,
        None => std::env::current_dir().map_err(|e| {
            Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
        })?,
    };

    let targets = targets::resolve(&entries, &root)?;

    Ok(Job {
        root,
        targets,
        rules,
        label: label.unwrap_or_else(|| DEFAULT_LABEL.to_string()),
        notes,
    })
}
