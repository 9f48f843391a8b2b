use clap::Args;
use serde::Serialize;

use retoken::preset::{self, Preset};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct PresetsArgs {
    /// Show a single preset with its full target list
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct PresetsOutput {
    pub command: &'static str,
    pub presets: Vec<PresetSummary>,
    /// Whether target lists are included.
    pub detailed: bool,
}

#[derive(Serialize)]
pub struct PresetSummary {
    pub name: String,
    pub description: String,
    pub label: String,
    pub rules: Vec<RuleSummary>,
    pub target_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
}

#[derive(Serialize)]
pub struct RuleSummary {
    pub from: String,
    pub to: String,
}

fn summarize(preset: &Preset, detailed: bool) -> PresetSummary {
    PresetSummary {
        name: preset.name.to_string(),
        description: preset.description.to_string(),
        label: preset.label.to_string(),
        rules: preset
            .rules
            .iter()
            .map(|(from, to)| RuleSummary {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect(),
        target_count: preset.targets.len(),
        targets: if detailed {
            preset.target_entries()
        } else {
            Vec::new()
        },
    }
}

pub fn run(args: PresetsArgs, _global: &GlobalArgs) -> CmdResult<PresetsOutput> {
    let presets = match args.name.as_deref() {
        Some(name) => vec![summarize(preset::find(name)?, true)],
        None => preset::all().iter().map(|p| summarize(p, false)).collect(),
    };

    Ok((
        PresetsOutput {
            command: "presets",
            detailed: args.name.is_some(),
            presets,
        },
        0,
    ))
}
