//! Fuzzy string similarity for near-miss keyword matching.
//!
//! Implements the Ratcliff-Obershelp matching-blocks ratio: find the longest
//! common substring, recurse on the pieces to its left and right, and score
//! `2 * matched / (len(a) + len(b))`. This matches the behavior of Python's
//! `difflib.SequenceMatcher.ratio` (without junk heuristics), which the
//! keyword tables were originally tuned against.

use crate::error::{AssentError, Result};

/// Find the longest common substring of `a` and `b`.
///
/// Returns `(start_a, start_b, length)`. Ties resolve to the earliest start
/// in `a`, then in `b`, so the computation is fully deterministic.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // Single rolling row: row[j + 1] holds the length of the common suffix
    // ending at a[i] / b[j].
    let mut row = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        let mut prev = 0;
        for (j, &cb) in b.iter().enumerate() {
            let diagonal = prev;
            prev = row[j + 1];
            if ca == cb {
                let length = diagonal + 1;
                row[j + 1] = length;
                if length > best.2 {
                    best = (i + 1 - length, j + 1 - length, length);
                }
            } else {
                row[j + 1] = 0;
            }
        }
    }

    best
}

/// Total characters covered by all matching blocks of `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, length) = longest_match(a, b);
    if length == 0 {
        return 0;
    }
    length
        + matching_chars(&a[..start_a], &b[..start_b])
        + matching_chars(&a[start_a + length..], &b[start_b + length..])
}

/// Normalized similarity ratio in `[0, 1]` between two strings.
///
/// Operates on `char`s so halfwidth and fullwidth text score consistently.
/// Two empty strings are identical (ratio 1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Token-to-keyword fuzzy matcher with a fixed acceptance threshold.
///
/// The threshold is inclusive: a ratio exactly equal to it is accepted.
/// Comparison is case-insensitive. O(tokens x keywords x length^2), which is
/// fine for tens of keywords and utterances of a handful of tokens.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    /// Default acceptance threshold.
    pub const DEFAULT_THRESHOLD: f64 = 0.8;

    /// Create a matcher with the given threshold.
    ///
    /// Returns a `Configuration` error if the threshold is outside `[0, 1]`
    /// or not a number.
    pub fn new(threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AssentError::configuration(format!(
                "Fuzzy threshold must be in [0, 1], got {threshold}"
            )));
        }
        Ok(FuzzyMatcher { threshold })
    }

    /// Get the configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether a single token/keyword pair clears the threshold.
    pub fn is_match(&self, token: &str, keyword: &str) -> bool {
        similarity(&token.to_lowercase(), &keyword.to_lowercase()) >= self.threshold
    }

    /// Scan `keywords` in order and return the first one the token matches,
    /// with its similarity ratio.
    pub fn first_match<'k>(&self, token: &str, keywords: &'k [String]) -> Option<(&'k str, f64)> {
        let token = token.to_lowercase();
        for keyword in keywords {
            let ratio = similarity(&token, keyword);
            if ratio >= self.threshold {
                return Some((keyword.as_str(), ratio));
            }
        }
        None
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        FuzzyMatcher {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}
