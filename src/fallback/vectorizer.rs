//! TF-IDF feature extraction.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Whether a word is a single Han character.
///
/// UAX #29 word segmentation emits each Han ideograph as its own word; there
/// is no dictionary segmenter here, so character bigrams stand in for
/// multi-character Chinese words.
fn is_single_han(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => ('\u{4e00}'..='\u{9fff}').contains(&c),
        _ => false,
    }
}

/// Split text into feature tokens: lowercased unicode words plus bigrams of
/// adjacent Han characters.
pub fn feature_tokens(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .unicode_words()
        .map(|word| word.to_lowercase())
        .collect();

    let mut tokens = words.clone();
    for pair in words.windows(2) {
        if is_single_han(&pair[0]) && is_single_han(&pair[1]) {
            tokens.push(format!("{}{}", pair[0], pair[1]));
        }
    }
    tokens
}

/// TF-IDF vectorizer over feature tokens.
///
/// Fit once on the training corpus; `transform` is read-only thereafter and
/// safe to share across threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: token -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per feature index.
    idf: Vec<f64>,
    /// Number of documents seen during fitting.
    n_documents: usize,
}

impl TfIdfVectorizer {
    /// Create an empty, unfitted vectorizer.
    pub fn new() -> Self {
        TfIdfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    /// Fit the vocabulary and IDF table on training documents.
    pub fn fit(&mut self, documents: &[String]) {
        self.n_documents = documents.len();
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique_tokens: HashSet<String> = feature_tokens(doc).into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                let next_index = vocabulary.len();
                vocabulary.entry(token).or_insert(next_index);
            }
        }

        // IDF = ln((N + 1) / (df + 1)) + 1, smoothed so unseen-in-training
        // terms never divide by zero.
        let mut idf = vec![0.0; vocabulary.len()];
        for (token, &index) in &vocabulary {
            let df = document_frequency.get(token).copied().unwrap_or(0);
            idf[index] = ((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
    }

    /// Transform a document into a TF-IDF feature vector.
    ///
    /// Tokens outside the fitted vocabulary contribute nothing; a document
    /// with no known tokens yields the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let tokens = feature_tokens(document);
        let mut tf = vec![0.0; self.vocabulary.len()];

        for token in &tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                tf[index] += 1.0;
            }
        }

        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }

        for (index, count) in tf.iter_mut().enumerate() {
            *count *= self.idf[index];
        }

        tf
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_tokens_latin() {
        assert_eq!(feature_tokens("OK sure"), vec!["ok", "sure"]);
    }

    #[test]
    fn test_feature_tokens_han_bigrams() {
        let tokens = feature_tokens("好的");
        assert!(tokens.contains(&"好".to_string()));
        assert!(tokens.contains(&"的".to_string()));
        assert!(tokens.contains(&"好的".to_string()));
    }

    #[test]
    fn test_fit_and_transform() {
        let documents = vec![
            "好的，开始吧".to_string(),
            "不要，取消".to_string(),
            "yes please".to_string(),
        ];

        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&documents);
        assert!(vectorizer.vocabulary_size() > 0);

        let features = vectorizer.transform("好的");
        assert_eq!(features.len(), vectorizer.vocabulary_size());
        assert!(features.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_unknown_tokens_yield_zero_vector() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&["好的".to_string()]);

        let features = vectorizer.transform("random latin words");
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_is_deterministic() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&["好的，开始吧".to_string(), "不要".to_string()]);
        assert_eq!(vectorizer.transform("开始"), vectorizer.transform("开始"));
    }
}
