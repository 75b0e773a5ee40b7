//! End-to-end classification scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use assent::config::PipelineConfig;
use assent::error::Result;
use assent::fallback::{CentroidClassifier, FallbackClassifier, Prediction};
use assent::intent::{Intent, Stage};
use assent::pipeline::ClassificationPipeline;
use assent::rules::ContextRule;

/// Fallback wrapper that counts invocations, for verifying short-circuits.
struct CountingFallback {
    inner: CentroidClassifier,
    calls: AtomicUsize,
}

impl CountingFallback {
    fn new() -> Self {
        CountingFallback {
            inner: CentroidClassifier::builtin().unwrap(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FallbackClassifier for CountingFallback {
    fn predict(&self, text: &str) -> Result<Prediction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.predict(text)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn default_pipeline() -> ClassificationPipeline {
    ClassificationPipeline::with_defaults().unwrap()
}

#[test]
fn test_every_affirmative_keyword_is_exact_match() -> Result<()> {
    let config = PipelineConfig::default();
    let pipeline = default_pipeline();

    for keyword in &config.affirmative_keywords {
        let result = pipeline.classify(keyword)?;
        assert_eq!(result.intent, Intent::Affirmative, "keyword {keyword}");
        assert_eq!(result.stage, Stage::ExactMatch, "keyword {keyword}");
    }
    Ok(())
}

#[test]
fn test_every_negative_keyword_classifies_negative() -> Result<()> {
    let config = PipelineConfig::default();
    let pipeline = default_pipeline();

    for keyword in &config.negative_keywords {
        if config.affirmative_keywords.contains(keyword) {
            continue; // cross-set overlap resolves affirmative by design
        }
        let result = pipeline.classify(keyword)?;
        assert_eq!(result.intent, Intent::Negative, "keyword {keyword}");
        assert_eq!(result.stage, Stage::ExactMatch, "keyword {keyword}");
    }
    Ok(())
}

#[test]
fn test_empty_input_never_reaches_fallback() -> Result<()> {
    let fallback = Arc::new(CountingFallback::new());
    let pipeline = ClassificationPipeline::new(&PipelineConfig::default(), fallback.clone())?;

    for text in ["", "   ", "\t", "简单来说："] {
        let result = pipeline.classify(text)?;
        assert_eq!(result.intent, Intent::Uncertain);
        assert_eq!(result.stage, Stage::EmptyInput);
    }
    assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);

    // A genuinely ambiguous utterance does reach the fallback.
    let result = pipeline.classify("随便啦")?;
    assert_eq!(result.stage, Stage::StatisticalFallback);
    assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_affirmative_scenario() -> Result<()> {
    let result = default_pipeline().classify("好的，开始吧")?;
    assert_eq!(result.intent, Intent::Affirmative);
    assert_eq!(result.stage, Stage::ExactMatch);
    Ok(())
}

#[test]
fn test_compound_negation_scenario() -> Result<()> {
    // "不想" contains no keyword and no token clears the fuzzy threshold;
    // the context rule decides.
    let result = default_pipeline().classify("不想")?;
    assert_eq!(result.intent, Intent::Negative);
    assert_eq!(result.stage, Stage::ContextRule);
    assert_eq!(result.keyword.as_deref(), Some("不想"));
    Ok(())
}

#[test]
fn test_ambiguous_scenario_forced_binary() -> Result<()> {
    let result = default_pipeline().classify("随便啦")?;
    assert_eq!(result.stage, Stage::StatisticalFallback);
    assert!(matches!(
        result.intent,
        Intent::Affirmative | Intent::Negative
    ));
    Ok(())
}

#[test]
fn test_fuzzy_threshold_boundary_end_to_end() -> Result<()> {
    // similarity("不想", "我不想") is exactly 0.8: accepted at an inclusive
    // threshold of 0.8.
    let config = PipelineConfig {
        affirmative_keywords: vec!["好的".to_string()],
        negative_keywords: vec!["我不想".to_string()],
        context_rules: vec![],
        ..Default::default()
    };
    let fallback = Arc::new(CentroidClassifier::builtin()?);
    let pipeline = ClassificationPipeline::new(&config, fallback.clone())?;

    let result = pipeline.classify("不想")?;
    assert_eq!(result.stage, Stage::FuzzyMatch);
    assert_eq!(result.intent, Intent::Negative);
    assert_eq!(result.score, Some(0.8));

    // similarity("不想", "我们不想") is 2/3: below threshold, the fallback
    // must decide instead.
    let config = PipelineConfig {
        affirmative_keywords: vec!["好的".to_string()],
        negative_keywords: vec!["我们不想".to_string()],
        context_rules: vec![],
        ..Default::default()
    };
    let pipeline = ClassificationPipeline::new(&config, fallback)?;

    let result = pipeline.classify("不想")?;
    assert_eq!(result.stage, Stage::StatisticalFallback);
    Ok(())
}

#[test]
fn test_context_rule_list_order_precedence() -> Result<()> {
    // Rule A's trigger is a substring of rule B's trigger; A is earlier and
    // wins even though B's trigger is longer.
    let config = PipelineConfig {
        affirmative_keywords: vec!["好的".to_string()],
        negative_keywords: vec!["取消".to_string()],
        context_rules: vec![
            ContextRule::new(vec!["再等"], Intent::Negative),
            ContextRule::new(vec!["再等一会儿"], Intent::Affirmative),
        ],
        ..Default::default()
    };
    let fallback = Arc::new(CentroidClassifier::builtin()?);
    let pipeline = ClassificationPipeline::new(&config, fallback)?;

    let result = pipeline.classify("再等一会儿")?;
    assert_eq!(result.intent, Intent::Negative);
    assert_eq!(result.stage, Stage::ContextRule);
    assert_eq!(result.keyword.as_deref(), Some("再等"));
    Ok(())
}

#[test]
fn test_classification_is_idempotent() -> Result<()> {
    let pipeline = default_pipeline();
    for text in ["好的，开始吧", "不想", "随便啦", "", "YES please"] {
        let first = pipeline.classify(text)?;
        for _ in 0..3 {
            assert_eq!(pipeline.classify(text)?, first);
        }
    }
    Ok(())
}

#[test]
fn test_concurrent_classification() -> Result<()> {
    let pipeline = Arc::new(default_pipeline());
    let expected = pipeline.classify("好的，开始吧")?;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            let expected = expected.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let result = pipeline.classify("好的，开始吧").unwrap();
                    assert_eq!(result, expected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    Ok(())
}

#[test]
fn test_english_utterances() -> Result<()> {
    let pipeline = default_pipeline();

    let result = pipeline.classify("YES, go ahead")?;
    assert_eq!(result.intent, Intent::Affirmative);
    assert_eq!(result.stage, Stage::ExactMatch);

    let result = pipeline.classify("nope")?;
    assert_eq!(result.intent, Intent::Negative);
    Ok(())
}
