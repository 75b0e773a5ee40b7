//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{AssentArgs, OutputFormat};
use crate::error::Result;
use crate::intent::MatchResult;

/// Result structure for single-utterance classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationOutput {
    pub text: String,
    pub label: String,
    pub stage: String,
    pub keyword: Option<String>,
    pub score: Option<f64>,
}

impl ClassificationOutput {
    /// Build the output payload from a classification result.
    pub fn from_result(text: &str, result: &MatchResult) -> Self {
        ClassificationOutput {
            text: text.to_string(),
            label: result.intent.to_string(),
            stage: result.stage.name().to_string(),
            keyword: result.keyword.clone(),
            score: result.score,
        }
    }
}

/// Result structure for batch classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub affirmative: usize,
    pub negative: usize,
    pub uncertain: usize,
    pub duration_ms: u64,
}

/// Result structure for model training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub samples: usize,
    pub vocabulary_size: usize,
    pub model_path: String,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &AssentArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &AssentArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
    }

    let value = serde_json::to_value(result)?;
    if let Some(obj) = value.as_object() {
        for (field, field_value) in obj {
            match field_value {
                serde_json::Value::Null => {}
                serde_json::Value::String(text) => println!("{field}: {text}"),
                other => println!("{field}: {other}"),
            }
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &AssentArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
