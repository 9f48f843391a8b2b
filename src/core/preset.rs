//! Built-in rule sets for recoloring the cafe site's component files.
//!
//! Target paths are relative to the site root.

use crate::error::{Error, Result};
use crate::replace::RuleSet;

#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    /// Status label for updated files.
    pub label: &'static str,
    pub rules: &'static [(&'static str, &'static str)],
    pub targets: &'static [&'static str],
    /// Lines printed after the summary.
    pub notes: &'static [&'static str],
}

impl Preset {
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::from_pairs(self.rules.iter().copied())
    }

    pub fn target_entries(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.to_string()).collect()
    }
}

const PRIMARY_COLORS: Preset = Preset {
    name: "primary-colors",
    description: "Rename the dark-blue color token to primary",
    label: "Updated",
    rules: &[("dark-blue", "primary")],
    targets: &[
        "components/About.tsx",
        "components/AboutDetail.tsx",
        "components/Contact.tsx",
        "components/Footer.tsx",
        "components/LargeLogo.tsx",
        "components/Menu.tsx",
        "components/MenuPreview.tsx",
        "components/Newsletter.tsx",
        "components/ui/feature-steps.tsx",
        "components/ui/membership-pricing.tsx",
    ],
    notes: &[],
};

const REVERT_TEXT_COLORS: Preset = Preset {
    name: "revert-text-colors",
    description: "Return text colors to dark-blue, leaving bg and border utilities on primary",
    label: "Reverted text colors",
    rules: &[
        ("text-primary", "text-dark-blue"),
        ("hover:text-primary", "hover:text-dark-blue"),
    ],
    targets: &[
        "components/Navbar.tsx",
        "components/About.tsx",
        "components/AboutDetail.tsx",
        "components/Contact.tsx",
        "components/Footer.tsx",
        "components/LargeLogo.tsx",
        "components/Menu.tsx",
        "components/MenuPreview.tsx",
        "components/Newsletter.tsx",
        "components/Testimonials.tsx",
        "components/ui/feature-steps.tsx",
        "components/ui/testimonials-columns.tsx",
        "components/ui/membership-pricing.tsx",
    ],
    notes: &[
        "✨ Text colors reverted to dark-blue",
        "🎨 Component colors (bg, border) remain orange (primary)",
    ],
};

const PRESETS: &[Preset] = &[PRIMARY_COLORS, REVERT_TEXT_COLORS];

pub fn all() -> &'static [Preset] {
    PRESETS
}

pub fn names() -> Vec<String> {
    PRESETS.iter().map(|p| p.name.to_string()).collect()
}

pub fn find(name: &str) -> Result<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| Error::preset_not_found(name, names()))
}
