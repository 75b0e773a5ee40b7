//! Core classification outcome types.
//!
//! - [`Intent`] - The three-way label an utterance resolves to
//! - [`Polarity`] - The binary output of the statistical fallback
//! - [`Stage`] - The pipeline stage that produced the final label
//! - [`MatchResult`] - Label plus diagnostic payload, produced fresh per call

use std::fmt;

use serde::{Deserialize, Serialize};

/// Confirmation intent of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// The speaker agrees / confirms ("好的，开始吧", "yes").
    Affirmative,
    /// The speaker declines / cancels ("不想", "取消吧").
    Negative,
    /// No stage produced a confident signal.
    Uncertain,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intent::Affirmative => "AFFIRMATIVE",
            Intent::Negative => "NEGATIVE",
            Intent::Uncertain => "UNCERTAIN",
        };
        write!(f, "{label}")
    }
}

/// Binary polarity emitted by the statistical fallback.
///
/// The fallback is a forced decision of last resort and never returns
/// `Uncertain`; using a separate two-variant type makes that guarantee
/// structural rather than conventional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Affirmative,
    Negative,
}

impl From<Polarity> for Intent {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Affirmative => Intent::Affirmative,
            Polarity::Negative => Intent::Negative,
        }
    }
}

/// The pipeline stage whose outcome produced the final label.
///
/// Stage names are stable identifiers used in diagnostic output and batch
/// results; renaming a variant's wire name is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Input normalized to an empty string; no stage ran.
    EmptyInput,
    /// Optional interrogative screen short-circuited the pipeline.
    QuestionGuard,
    /// A token matched a keyword set exactly (case-insensitively).
    ExactMatch,
    /// A keyword was found as a substring of the whole normalized text.
    SubstringMatch,
    /// A token cleared the fuzzy similarity threshold against a keyword.
    FuzzyMatch,
    /// A context rule's trigger substring forced the label.
    ContextRule,
    /// The statistical fallback made the final binary decision.
    StatisticalFallback,
}

impl Stage {
    /// Stable wire name for this stage.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::EmptyInput => "empty-input",
            Stage::QuestionGuard => "question-guard",
            Stage::ExactMatch => "exact-match",
            Stage::SubstringMatch => "substring-match",
            Stage::FuzzyMatch => "fuzzy-match",
            Stage::ContextRule => "context-rule",
            Stage::StatisticalFallback => "statistical-fallback",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of a single classification call.
///
/// Carries the deciding stage for auditability and, where a stage has one,
/// the matched keyword or trigger and a similarity/confidence score.
/// Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Final label.
    pub intent: Intent,
    /// Stage that decided the label.
    pub stage: Stage,
    /// Matched keyword or rule trigger, when the stage has one.
    pub keyword: Option<String>,
    /// Fuzzy similarity ratio or fallback confidence, when the stage has one.
    pub score: Option<f64>,
}

impl MatchResult {
    /// Create a result with no diagnostic payload.
    pub fn new(intent: Intent, stage: Stage) -> Self {
        MatchResult {
            intent,
            stage,
            keyword: None,
            score: None,
        }
    }

    /// Attach the matched keyword or trigger.
    pub fn with_keyword<S: Into<String>>(mut self, keyword: S) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Attach a similarity or confidence score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Whether this result is a terminal `Uncertain` (empty input or
    /// question guard), as opposed to a decided label.
    pub fn is_uncertain(&self) -> bool {
        self.intent == Intent::Uncertain
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.intent, self.stage)
    }
}
