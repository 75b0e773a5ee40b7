//! # Assent
//!
//! A staged affirmative/negative intent classifier for short voice-command
//! confirmations ("start cooking?" → yes/no).
//!
//! ## Pipeline
//!
//! - Normalization and tokenization
//! - Exact lexicon lookup
//! - Whole-text keyword containment
//! - Fuzzy similarity matching
//! - Contextual override rules
//! - Statistical fallback (forced binary decision)
//!
//! Every result carries the deciding stage for auditability. Configuration
//! tables and the fallback model are loaded once at startup; classification
//! is pure and safe to run concurrently.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fuzzy;
pub mod intent;
pub mod lexicon;
pub mod pipeline;
pub mod rules;

pub use config::PipelineConfig;
pub use error::{AssentError, Result};
pub use intent::{Intent, MatchResult, Polarity, Stage};
pub use pipeline::ClassificationPipeline;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
