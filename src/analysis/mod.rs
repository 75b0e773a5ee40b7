//! Text preparation for the classification pipeline.
//!
//! Normalization and tokenization are separate pure steps: the normalizer
//! strips presentation scaffolding from the raw utterance, the tokenizer
//! splits the normalized text on whitespace and sentence punctuation.

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::Normalizer;
pub use tokenizer::UtteranceTokenizer;
