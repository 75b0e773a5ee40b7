//! Pipeline configuration.
//!
//! Keyword tables, lead-in phrases, context rules, and the fuzzy threshold
//! are externally supplied data, loaded once at startup and never mutated.
//! The builtin defaults below were curated against microwave voice-
//! confirmation logs; deployments override them with a JSON config file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::UtteranceTokenizer;
use crate::error::{AssentError, Result};
use crate::fuzzy::FuzzyMatcher;
use crate::intent::Intent;
use crate::lexicon::Lexicon;
use crate::rules::{ContextRule, ContextRuleEngine};

/// Full configuration for a classification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Inclusive fuzzy-match acceptance threshold in `[0, 1]`.
    pub fuzzy_threshold: f64,
    /// Lead-in scaffolding phrases stripped by the normalizer.
    pub lead_in_phrases: Vec<String>,
    /// Affirmative keyword table, in scan order.
    pub affirmative_keywords: Vec<String>,
    /// Negative keyword table, in scan order.
    pub negative_keywords: Vec<String>,
    /// Context override rules, in precedence order.
    pub context_rules: Vec<ContextRule>,
    /// Whether the interrogative screen runs before keyword matching.
    pub question_guard: bool,
    /// Interrogative markers consulted when the guard is enabled.
    pub question_markers: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            fuzzy_threshold: FuzzyMatcher::DEFAULT_THRESHOLD,
            lead_in_phrases: default_lead_in_phrases(),
            affirmative_keywords: default_affirmative_keywords(),
            negative_keywords: default_negative_keywords(),
            context_rules: default_context_rules(),
            question_guard: false,
            question_markers: default_question_markers(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration without building a pipeline.
    ///
    /// All failures are `Configuration` errors: bad threshold, empty or
    /// duplicate keywords within a set, unusable context rules, empty
    /// question markers. Overlap *across* the keyword sets is tolerated and
    /// resolves affirmative (see [`Lexicon`]).
    pub fn validate(&self) -> Result<()> {
        FuzzyMatcher::new(self.fuzzy_threshold)?;
        Lexicon::new(
            self.affirmative_keywords.clone(),
            self.negative_keywords.clone(),
        )?;
        ContextRuleEngine::new(self.context_rules.clone())?;
        UtteranceTokenizer::new()?;

        if self.question_guard && self.question_markers.is_empty() {
            return Err(AssentError::configuration(
                "Question guard enabled with no question markers",
            ));
        }
        if self.question_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(AssentError::configuration("Empty question marker"));
        }
        Ok(())
    }
}

/// Lead-in scaffolding phrases observed in confirmation logs.
pub fn default_lead_in_phrases() -> Vec<String> {
    [
        "我觉得可以这样：",
        "确认一下，我说的是：",
        "实际上是这样的：",
        "现在我们可以这样处理：",
        "听我的：",
        "对了，还有：",
        "可以确认，现在开始：",
        "简单来说：",
        "如果你问我的话：",
        "具体情况是这样的：",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Builtin affirmative surface forms.
pub fn default_affirmative_keywords() -> Vec<String> {
    [
        "好的", "好吧", "需要", "可以", "确定", "确认", "当然", "ok", "yes", "启动", "开始",
        "继续", "安排", "马上", "运行", "搞定", "就绪", "动手", "开启", "没问题", "同意",
        "愿意", "准备好了", "开始吧", "启动吧", "马上开始", "现在开始", "直接开始",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Builtin negative surface forms.
pub fn default_negative_keywords() -> Vec<String> {
    [
        "不要", "不用", "不需要", "不行", "不了", "没有", "先别", "暂时不", "不开始",
        "不启动", "不运行", "拒绝", "停止", "取消", "否认", "放弃", "不做", "没准备",
        "算了", "没法", "无法", "不可以", "no", "not", "nope",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Builtin context override rules, in precedence order.
///
/// These cover compound negations whose parts are not keywords on their own
/// ("不想" contains neither an affirmative nor a negative surface form).
pub fn default_context_rules() -> Vec<ContextRule> {
    vec![
        ContextRule::new(vec!["不想", "不愿", "不希望"], Intent::Negative),
        ContextRule::new(vec!["不能", "没办法"], Intent::Negative),
        ContextRule::new(vec!["再想想", "再考虑", "改变主意"], Intent::Negative),
        ContextRule::new(vec!["等会", "等等", "再等"], Intent::Negative),
    ]
}

/// Builtin interrogative markers for the optional question guard.
pub fn default_question_markers() -> Vec<String> {
    [
        "吗", "么", "呢", "什么", "怎么", "为什么", "如何", "哪里", "能不能", "是不是",
        "要不要", "会不会", "多少",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
