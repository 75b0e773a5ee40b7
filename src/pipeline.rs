//! The staged classification pipeline.
//!
//! Stages run in a fixed precedence order, each a pure function of the
//! normalized text; the pipeline advances only while a stage is
//! inconclusive. The deciding stage is recorded in every result so a
//! classification can be audited after the fact.

use std::sync::Arc;

use crate::analysis::{Normalizer, UtteranceTokenizer};
use crate::config::PipelineConfig;
use crate::error::{AssentError, Result};
use crate::fallback::{CentroidClassifier, FallbackClassifier};
use crate::fuzzy::FuzzyMatcher;
use crate::intent::{Intent, MatchResult, Stage};
use crate::lexicon::Lexicon;
use crate::rules::ContextRuleEngine;

/// Orchestrates normalization, lexical matching, context rules, and the
/// statistical fallback.
///
/// Stateless per call: the lexicon, rules, and fallback model are loaded at
/// construction and shared read-only, so a pipeline behind an `Arc` may be
/// used concurrently without locking.
pub struct ClassificationPipeline {
    normalizer: Normalizer,
    tokenizer: UtteranceTokenizer,
    lexicon: Lexicon,
    fuzzy: FuzzyMatcher,
    rules: ContextRuleEngine,
    fallback: Arc<dyn FallbackClassifier>,
    question_guard: Option<Vec<String>>,
}

impl std::fmt::Debug for ClassificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationPipeline")
            .field("fuzzy_threshold", &self.fuzzy.threshold())
            .field("rules", &self.rules.len())
            .field("fallback", &self.fallback.name())
            .field("question_guard", &self.question_guard.is_some())
            .finish()
    }
}

impl ClassificationPipeline {
    /// Build a pipeline from a validated configuration and a loaded
    /// fallback classifier.
    pub fn new(config: &PipelineConfig, fallback: Arc<dyn FallbackClassifier>) -> Result<Self> {
        config.validate()?;

        let question_guard = if config.question_guard {
            Some(
                config
                    .question_markers
                    .iter()
                    .map(|m| m.to_lowercase())
                    .collect(),
            )
        } else {
            None
        };

        Ok(ClassificationPipeline {
            normalizer: Normalizer::new(config.lead_in_phrases.clone()),
            tokenizer: UtteranceTokenizer::new()?,
            lexicon: Lexicon::new(
                config.affirmative_keywords.clone(),
                config.negative_keywords.clone(),
            )?,
            fuzzy: FuzzyMatcher::new(config.fuzzy_threshold)?,
            rules: ContextRuleEngine::new(config.context_rules.clone())?,
            fallback,
            question_guard,
        })
    }

    /// Build a pipeline with builtin tables and the builtin centroid model.
    pub fn with_defaults() -> Result<Self> {
        let fallback = Arc::new(CentroidClassifier::builtin()?);
        Self::new(&PipelineConfig::default(), fallback)
    }

    /// Classify a raw utterance.
    ///
    /// Errors only on invalid input or an unusable fallback model; an
    /// utterance without a confident signal yields `Uncertain`, not an
    /// error.
    pub fn classify(&self, raw_text: &str) -> Result<MatchResult> {
        if raw_text.contains('\0') {
            return Err(AssentError::invalid_input(
                "Utterance contains an embedded NUL",
            ));
        }

        let text = self.normalizer.normalize(raw_text);

        // The fallback has no reliable signal for empty text; short-circuit
        // before any stage runs.
        if text.is_empty() {
            return Ok(MatchResult::new(Intent::Uncertain, Stage::EmptyInput));
        }

        if let Some(markers) = &self.question_guard
            && let Some(marker) = markers.iter().find(|m| text.contains(m.as_str()))
        {
            return Ok(MatchResult::new(Intent::Uncertain, Stage::QuestionGuard)
                .with_keyword(marker.as_str()));
        }

        let tokens = self.tokenizer.tokenize(&text);

        // Stage 1: exact lexicon match, tokens left to right. Affirmative
        // membership is consulted before negative per token.
        for token in &tokens {
            if let Some(intent) = self.lexicon.exact_match(token) {
                return Ok(
                    MatchResult::new(intent, Stage::ExactMatch).with_keyword(token.as_str())
                );
            }
        }

        // Stage 2: coarse containment pass over the whole normalized text.
        if let Some((intent, keyword)) = self.lexicon.containment_match(&text) {
            return Ok(MatchResult::new(intent, Stage::SubstringMatch).with_keyword(keyword));
        }

        // Stage 3: fuzzy match per token, affirmative set before negative.
        for token in &tokens {
            if let Some((keyword, score)) =
                self.fuzzy.first_match(token, self.lexicon.affirmative())
            {
                return Ok(MatchResult::new(Intent::Affirmative, Stage::FuzzyMatch)
                    .with_keyword(keyword)
                    .with_score(score));
            }
            if let Some((keyword, score)) = self.fuzzy.first_match(token, self.lexicon.negative())
            {
                return Ok(MatchResult::new(Intent::Negative, Stage::FuzzyMatch)
                    .with_keyword(keyword)
                    .with_score(score));
            }
        }

        // Stage 4: context override rules over the whole normalized text.
        if let Some((intent, trigger)) = self.rules.apply(&text) {
            return Ok(MatchResult::new(intent, Stage::ContextRule).with_keyword(trigger));
        }

        // Stage 5: forced binary decision.
        let prediction = self.fallback.predict(&text)?;
        Ok(
            MatchResult::new(prediction.polarity.into(), Stage::StatisticalFallback)
                .with_score(prediction.confidence),
        )
    }

    /// Name of the configured fallback classifier.
    pub fn fallback_name(&self) -> &'static str {
        self.fallback.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> ClassificationPipeline {
        ClassificationPipeline::with_defaults().unwrap()
    }

    #[test]
    fn test_exact_match_decides_first() {
        let result = pipeline().classify("好的，开始吧").unwrap();
        assert_eq!(result.intent, Intent::Affirmative);
        assert_eq!(result.stage, Stage::ExactMatch);
        assert_eq!(result.keyword.as_deref(), Some("好的"));
    }

    #[test]
    fn test_exact_negative() {
        let result = pipeline().classify("取消").unwrap();
        assert_eq!(result.intent, Intent::Negative);
        assert_eq!(result.stage, Stage::ExactMatch);
    }

    #[test]
    fn test_substring_containment() {
        // "启动" is contained in the single token "帮我启动烹饪", which the
        // exact pass cannot resolve.
        let result = pipeline().classify("帮我启动烹饪").unwrap();
        assert_eq!(result.intent, Intent::Affirmative);
        assert_eq!(result.stage, Stage::SubstringMatch);
        assert_eq!(result.keyword.as_deref(), Some("启动"));
    }

    #[test]
    fn test_context_rule_resolves_compound_negation() {
        let result = pipeline().classify("不想").unwrap();
        assert_eq!(result.intent, Intent::Negative);
        assert_eq!(result.stage, Stage::ContextRule);
        assert_eq!(result.keyword.as_deref(), Some("不想"));
    }

    #[test]
    fn test_fallback_is_forced_binary() {
        let result = pipeline().classify("随便啦").unwrap();
        assert_eq!(result.stage, Stage::StatisticalFallback);
        assert_ne!(result.intent, Intent::Uncertain);
        assert!(result.score.is_some());
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let result = pipeline().classify("").unwrap();
        assert_eq!(result.intent, Intent::Uncertain);
        assert_eq!(result.stage, Stage::EmptyInput);

        let result = pipeline().classify("   \t ").unwrap();
        assert_eq!(result.stage, Stage::EmptyInput);
    }

    #[test]
    fn test_lead_in_stripped_before_matching() {
        let result = pipeline().classify("我觉得可以这样：好的").unwrap();
        assert_eq!(result.intent, Intent::Affirmative);
        assert_eq!(result.stage, Stage::ExactMatch);
    }

    #[test]
    fn test_embedded_nul_rejected() {
        let result = pipeline().classify("好的\0");
        assert!(matches!(result, Err(AssentError::InvalidInput(_))));
    }

    #[test]
    fn test_question_guard_opt_in() {
        let config = PipelineConfig {
            question_guard: true,
            ..Default::default()
        };
        let fallback = Arc::new(CentroidClassifier::builtin().unwrap());
        let guarded = ClassificationPipeline::new(&config, fallback).unwrap();

        let result = guarded.classify("要不要现在开始吗").unwrap();
        assert_eq!(result.intent, Intent::Uncertain);
        assert_eq!(result.stage, Stage::QuestionGuard);

        // Off by default: the same text classifies normally.
        let result = pipeline().classify("要不要现在开始吗").unwrap();
        assert_ne!(result.stage, Stage::QuestionGuard);
    }

    #[test]
    fn test_idempotent() {
        let p = pipeline();
        for text in ["好的", "不想", "随便啦", ""] {
            assert_eq!(p.classify(text).unwrap(), p.classify(text).unwrap());
        }
    }
}
