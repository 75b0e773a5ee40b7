//! Command implementations for the assent CLI.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PipelineConfig;
use crate::error::{AssentError, Result};
use crate::fallback::{CentroidClassifier, TrainingSample};
use crate::intent::Intent;
use crate::pipeline::ClassificationPipeline;

/// Execute a CLI command.
pub fn execute_command(args: AssentArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify_utterance(classify_args.clone(), &args),
        Command::Batch(batch_args) => run_batch(batch_args.clone(), &args),
        Command::Train(train_args) => train_model(train_args.clone(), &args),
    }
}

/// Build a pipeline from optional config and model paths, falling back to
/// the builtin tables and builtin model.
fn load_pipeline(config: Option<&Path>, model: Option<&Path>) -> Result<ClassificationPipeline> {
    let config = match config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    let fallback = match model {
        Some(path) => Arc::new(CentroidClassifier::load(path)?),
        None => Arc::new(CentroidClassifier::builtin()?),
    };

    ClassificationPipeline::new(&config, fallback)
}

/// Classify a single utterance.
fn classify_utterance(args: ClassifyArgs, cli_args: &AssentArgs) -> Result<()> {
    let pipeline = load_pipeline(args.config.as_deref(), args.model.as_deref())?;
    let result = pipeline.classify(&args.text)?;

    output_result(
        "Classification result",
        &ClassificationOutput::from_result(&args.text, &result),
        cli_args,
    )
}

/// Classify a file of utterances, one per line, preserving input order.
fn run_batch(args: BatchArgs, cli_args: &AssentArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Classifying utterances from: {}", args.input.display());
        println!("Writing results to: {}", args.output.display());
    }

    let pipeline = load_pipeline(args.config.as_deref(), args.model.as_deref())?;
    let workers = args.workers.unwrap_or_else(num_cpus::get);
    let summary = batch_classify(&pipeline, &args.input, &args.output, workers)?;

    output_result("Batch classification complete", &summary, cli_args)
}

/// Batch-classify `input` into `output` with a bounded worker pool.
///
/// One utterance per line in; one `<utterance> => <label>` per line out,
/// input order preserved. Blank lines are skipped. Invalid UTF-8 input is an
/// `InvalidInput` error, not a silently coerced line.
pub fn batch_classify(
    pipeline: &ClassificationPipeline,
    input: &Path,
    output: &Path,
    workers: usize,
) -> Result<BatchSummary> {
    let start_time = Instant::now();

    let bytes = std::fs::read(input)?;
    let content = String::from_utf8(bytes).map_err(|e| {
        AssentError::invalid_input(format!("{} is not valid UTF-8: {e}", input.display()))
    })?;

    let utterances: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .map_err(|e| AssentError::other(format!("Failed to build worker pool: {e}")))?;

    // par_iter + collect keeps results in input order.
    let results = pool.install(|| {
        utterances
            .par_iter()
            .map(|utterance| pipeline.classify(utterance))
            .collect::<Result<Vec<_>>>()
    })?;

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let mut summary = BatchSummary {
        total: results.len(),
        affirmative: 0,
        negative: 0,
        uncertain: 0,
        duration_ms: 0,
    };

    for (utterance, result) in utterances.iter().zip(&results) {
        writeln!(writer, "{utterance} => {}", result.intent)?;
        match result.intent {
            Intent::Affirmative => summary.affirmative += 1,
            Intent::Negative => summary.negative += 1,
            Intent::Uncertain => summary.uncertain += 1,
        }
    }
    writer.flush()?;

    summary.duration_ms = start_time.elapsed().as_millis() as u64;
    Ok(summary)
}

/// Train a fallback model artifact from labeled samples.
fn train_model(args: TrainArgs, cli_args: &AssentArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Training from: {}", args.samples.display());
    }

    let start_time = Instant::now();
    let samples = TrainingSample::load_json(&args.samples)?;
    let classifier = CentroidClassifier::train(&samples)?;
    classifier.save(&args.model)?;

    output_result(
        "Model trained",
        &TrainingSummary {
            samples: samples.len(),
            vocabulary_size: classifier.vocabulary_size(),
            model_path: args.model.display().to_string(),
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}
