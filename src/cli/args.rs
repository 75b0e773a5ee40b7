//! Command line argument parsing for the assent CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Assent - a staged yes/no confirmation-intent classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "assent")]
#[command(about = "Classify short confirmation utterances as affirmative, negative, or uncertain")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AssentArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AssentArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify a single utterance
    Classify(ClassifyArgs),

    /// Classify a file of utterances, one per line
    Batch(BatchArgs),

    /// Train a fallback model artifact from labeled samples
    Train(TrainArgs),
}

/// Arguments for single-utterance classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// The utterance to classify
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Pipeline configuration file (JSON); builtin tables when omitted
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Fallback model artifact; builtin model when omitted
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,
}

/// Arguments for batch classification
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Input file, one utterance per line
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Output file, one "<utterance> => <label>" per line, input order kept
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Pipeline configuration file (JSON); builtin tables when omitted
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Fallback model artifact; builtin model when omitted
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Worker threads for the classification pool (defaults to CPU count)
    #[arg(short, long)]
    pub workers: Option<usize>,
}

/// Arguments for model training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled samples file (JSON array of {text, polarity})
    #[arg(value_name = "SAMPLES_FILE")]
    pub samples: PathBuf,

    /// Where to write the model artifact
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
