//! Separator-based utterance tokenizer.

use std::sync::Arc;

use regex::Regex;

use crate::error::{AssentError, Result};

/// Separator class: whitespace plus halfwidth and fullwidth sentence
/// punctuation. Unicode `\s` covers the ideographic space U+3000.
pub const SEPARATOR_PATTERN: &str = r"[\s,;.!?、，；。]+";

/// Splits a normalized utterance into tokens on whitespace and a fixed
/// punctuation class. Empty tokens are dropped; token order follows the
/// input left to right.
///
/// Re-tokenizing the same string is deterministic and idempotent.
#[derive(Debug, Clone)]
pub struct UtteranceTokenizer {
    separators: Arc<Regex>,
}

impl UtteranceTokenizer {
    /// Create a tokenizer with the default separator class.
    pub fn new() -> Result<Self> {
        Self::with_pattern(SEPARATOR_PATTERN)
    }

    /// Create a tokenizer with a custom separator pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            AssentError::configuration(format!("Invalid separator pattern: {e}"))
        })?;

        Ok(UtteranceTokenizer {
            separators: Arc::new(regex),
        })
    }

    /// Get the separator pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.separators.as_str()
    }

    /// Tokenize a normalized utterance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.separators
            .split(text)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for UtteranceTokenizer {
    fn default() -> Self {
        Self::new().expect("Default separator pattern should be valid")
    }
}
