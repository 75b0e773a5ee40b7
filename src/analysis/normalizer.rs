//! Utterance normalization.

/// Normalizes a raw utterance before any matching runs.
///
/// Normalization lowercases the text (a no-op for Han characters), strips
/// configured lead-in scaffolding phrases ("我觉得可以这样：", "简单来说：",
/// ...) while one is present as a prefix, and trims surrounding whitespace.
/// Pure: the same input always yields the same output, and empty input
/// yields empty output, which the pipeline treats as `Uncertain`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Lead-in phrases, stored lowercased so prefix checks see the same
    /// casing as the normalized text.
    lead_ins: Vec<String>,
}

impl Normalizer {
    /// Create a normalizer with the given lead-in scaffolding phrases.
    pub fn new(lead_ins: Vec<String>) -> Self {
        let lead_ins = lead_ins
            .into_iter()
            .map(|phrase| phrase.to_lowercase())
            .collect();
        Normalizer { lead_ins }
    }

    /// Normalize a raw utterance.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = text.trim().to_lowercase();

        // Strip stacked lead-ins until none applies.
        loop {
            let mut stripped = false;
            for phrase in &self.lead_ins {
                if phrase.is_empty() {
                    continue;
                }
                if let Some(rest) = current.strip_prefix(phrase.as_str()) {
                    current = rest.trim_start().to_string();
                    stripped = true;
                    break;
                }
            }
            if !stripped {
                break;
            }
        }

        current.trim().to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(crate::config::default_lead_in_phrases())
    }
}
