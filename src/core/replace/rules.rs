//! Ordered literal replacement rules.
//!
//! Rules are applied one after another, each to the output of the previous
//! one. Matching is plain substring search: no boundaries, no case variants,
//! no regex. Input order is never changed.

use crate::error::{Error, Result};
use serde::Serialize;

// ============================================================================
// Types
// ============================================================================

/// A literal `from` → `to` substitution. `from` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementRule {
    from: String,
    to: String,
}

impl ReplacementRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self> {
        let from = from.into();
        let to = to.into();

        if from.is_empty() {
            return Err(Error::validation_invalid_argument(
                "from",
                format!("Replacement pattern must not be empty (replacement was '{}')", to),
                None,
                None,
            ));
        }

        Ok(Self { from, to })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// The inverse rule (`to` → `from`). Fails when `to` is empty.
    pub fn inverse(&self) -> Result<Self> {
        Self::new(self.to.clone(), self.from.clone())
    }
}

/// A diagnostic about the rule set itself. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleWarning {
    /// Warning category: `shadowed_rule` or `non_idempotent_rule`.
    pub kind: String,
    /// Rule position (1-indexed).
    pub rule: usize,
    /// Human-readable description.
    pub message: String,
}

/// Content after a rule set ran over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub content: String,
    /// Occurrences replaced by each rule, in rule order.
    pub hits: Vec<usize>,
}

impl Applied {
    pub fn replacements(&self) -> usize {
        self.hits.iter().sum()
    }
}

/// An ordered sequence of replacement rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<ReplacementRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from `(from, to)` pairs, keeping their order.
    pub fn from_pairs<I, F, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(from, to)| ReplacementRule::new(from, to))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn push(&mut self, rule: ReplacementRule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReplacementRule> {
        self.rules.iter()
    }

    /// Apply every rule in order, each replacing all non-overlapping
    /// occurrences of its pattern left to right.
    pub fn apply(&self, content: &str) -> Applied {
        let mut current = content.to_string();
        let mut hits = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let count = current.matches(rule.from.as_str()).count();
            if count > 0 {
                current = current.replace(rule.from.as_str(), &rule.to);
            }
            hits.push(count);
        }

        Applied {
            content: current,
            hits,
        }
    }

    /// The undo rule set: every rule inverted, in reverse order.
    pub fn reversed(&self) -> Result<RuleSet> {
        let rules = self
            .rules
            .iter()
            .rev()
            .map(ReplacementRule::inverse)
            .collect::<Result<Vec<_>>>()
            .map_err(|_| {
                Error::validation_invalid_argument(
                    "reverse",
                    "Cannot reverse a rule with an empty replacement",
                    None,
                    None,
                )
            })?;
        Ok(RuleSet { rules })
    }

    /// Detect rules that can never match original text, and rules whose
    /// replacement re-introduces their own pattern.
    pub fn warnings(&self) -> Vec<RuleWarning> {
        let mut warnings = Vec::new();

        for (j, later) in self.rules.iter().enumerate() {
            if let Some((i, earlier)) = self.rules[..j]
                .iter()
                .enumerate()
                .find(|(_, earlier)| later.from.contains(earlier.from.as_str()))
            {
                warnings.push(RuleWarning {
                    kind: "shadowed_rule".to_string(),
                    rule: j + 1,
                    message: format!(
                        "Rule {} ('{}') is shadowed by rule {} ('{}'), which replaces its occurrences first",
                        j + 1,
                        later.from,
                        i + 1,
                        earlier.from
                    ),
                });
            }

            if later.to.contains(later.from.as_str()) {
                warnings.push(RuleWarning {
                    kind: "non_idempotent_rule".to_string(),
                    rule: j + 1,
                    message: format!(
                        "Rule {} replacement '{}' contains its own pattern '{}'; running again will match again",
                        j + 1,
                        later.to,
                        later.from
                    ),
                });
            }
        }

        warnings
    }
}

// ============================================================================
// Tests
// ============================================================================
