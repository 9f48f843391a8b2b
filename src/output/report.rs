//! Human-readable status lines.

use retoken::replace::{FileOutcome, FileStatus};

use crate::commands::presets::PresetsOutput;
use crate::commands::run::RunOutput;

/// Line-oriented text rendering of a command's output.
pub trait Report {
    fn report(&self) -> String;
}

fn outcome_line(outcome: &FileOutcome, label: &str, dry_run: bool) -> String {
    match outcome.status {
        FileStatus::Updated if dry_run => format!("🔍 Would update: {}", outcome.target),
        FileStatus::Updated => format!("✅ {}: {}", label, outcome.target),
        FileStatus::Unchanged => format!("⏭️  No changes needed: {}", outcome.target),
        FileStatus::Failed => format!(
            "❌ Error updating {}: {}",
            outcome.target,
            outcome.error.as_deref().unwrap_or("unknown error")
        ),
        FileStatus::NotFound => format!("⚠️  File not found: {}", outcome.target),
    }
}

impl Report for RunOutput {
    fn report(&self) -> String {
        let mut lines: Vec<String> = self
            .result
            .outcomes
            .iter()
            .map(|o| outcome_line(o, &self.label, self.dry_run))
            .collect();

        lines.push(String::new());
        if self.dry_run {
            lines.push(format!(
                "🔍 Total files that would be updated: {}",
                self.result.updated
            ));
        } else {
            lines.push(format!("🎉 Total files updated: {}", self.result.updated));
        }

        if !self.notes.is_empty() {
            lines.push(String::new());
            lines.extend(self.notes.iter().cloned());
        }

        lines.join("\n")
    }
}

impl Report for PresetsOutput {
    fn report(&self) -> String {
        let mut lines = Vec::new();

        for preset in &self.presets {
            lines.push(format!("{}: {}", preset.name, preset.description));
            for rule in &preset.rules {
                lines.push(format!("  {} → {}", rule.from, rule.to));
            }
            if self.detailed {
                lines.extend(preset.targets.iter().map(|t| format!("  - {}", t)));
            } else {
                lines.push(format!("  {} targets", preset.target_count));
            }
        }

        lines.join("\n")
    }
}
