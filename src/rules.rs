//! Contextual override rules.
//!
//! Compound phrases like "不想" (don't want to) defeat single-keyword
//! matching: no token equals a keyword and no keyword is contained in the
//! text, yet the intent is unambiguous. Context rules resolve these with
//! trigger substrings that force a label when lexical stages come up empty.

use serde::{Deserialize, Serialize};

use crate::error::{AssentError, Result};
use crate::intent::Intent;

/// A single override rule: if any trigger substring occurs in the normalized
/// text, the rule forces its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRule {
    /// Trigger substrings, scanned in list order.
    pub triggers: Vec<String>,
    /// Label forced when a trigger is found.
    pub label: Intent,
}

impl ContextRule {
    /// Create a rule from trigger substrings and a forced label.
    pub fn new<S: Into<String>>(triggers: Vec<S>, label: Intent) -> Self {
        ContextRule {
            triggers: triggers.into_iter().map(Into::into).collect(),
            label,
        }
    }
}

/// Ordered rule list; first match wins.
///
/// Rule order is significant: when two rules both match a text, the rule
/// earlier in the list decides, regardless of trigger length.
#[derive(Debug, Clone)]
pub struct ContextRuleEngine {
    rules: Vec<ContextRule>,
}

impl ContextRuleEngine {
    /// Build an engine from an ordered rule list.
    ///
    /// Returns a `Configuration` error for a rule with no triggers, an empty
    /// trigger string, or an `Uncertain` label (such a rule could never
    /// decide anything: the pipeline advances on `Uncertain` anyway).
    pub fn new(rules: Vec<ContextRule>) -> Result<Self> {
        for (index, rule) in rules.iter().enumerate() {
            if rule.triggers.is_empty() {
                return Err(AssentError::configuration(format!(
                    "Context rule {index} has no triggers"
                )));
            }
            if rule.triggers.iter().any(|t| t.trim().is_empty()) {
                return Err(AssentError::configuration(format!(
                    "Context rule {index} has an empty trigger"
                )));
            }
            if rule.label == Intent::Uncertain {
                return Err(AssentError::configuration(format!(
                    "Context rule {index} forces UNCERTAIN, which is a no-op"
                )));
            }
        }
        Ok(ContextRuleEngine { rules })
    }

    /// Scan the normalized text against every rule in list order.
    ///
    /// Returns the forced label and the trigger that fired, or `None` when
    /// no rule matches.
    pub fn apply<'e>(&'e self, text: &str) -> Option<(Intent, &'e str)> {
        for rule in &self.rules {
            for trigger in &rule.triggers {
                if text.contains(trigger.as_str()) {
                    return Some((rule.label, trigger.as_str()));
                }
            }
        }
        None
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule list is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
