//! Statistical fallback classification.
//!
//! The fallback is the terminal pipeline stage: a pre-trained text
//! classifier that makes a forced binary decision when every rule-based
//! stage was inconclusive. The algorithm is deliberately pluggable behind
//! [`FallbackClassifier`]; the shipped implementation is
//! [`CentroidClassifier`], a TF-IDF nearest-centroid model.

pub mod centroid;
pub mod vectorizer;

pub use centroid::{CentroidClassifier, TrainingSample};
pub use vectorizer::TfIdfVectorizer;

use crate::error::Result;
use crate::intent::Polarity;

/// A binary prediction from the fallback, with a confidence score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Forced binary label. The fallback never emits `Uncertain`.
    pub polarity: Polarity,
    /// Model confidence in `[0, 1]`; semantics are model-specific.
    pub confidence: f64,
}

/// A pre-trained binary text classifier.
///
/// Implementations are loaded once at startup and shared read-only across
/// classification calls; `predict` must be side-effect free and safe to call
/// concurrently. A failure to invoke the underlying model surfaces
/// `ModelUnavailable` rather than a guessed label.
pub trait FallbackClassifier: Send + Sync {
    /// Classify normalized text into a forced binary polarity.
    fn predict(&self, text: &str) -> Result<Prediction>;

    /// Name of this classifier (for diagnostics and configuration).
    fn name(&self) -> &'static str;
}
