//! TF-IDF nearest-centroid fallback classifier.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AssentError, Result};
use crate::fallback::vectorizer::TfIdfVectorizer;
use crate::fallback::{FallbackClassifier, Prediction};
use crate::intent::Polarity;

/// Artifact format version; bumped on any incompatible layout change.
const ARTIFACT_VERSION: u32 = 1;

/// A labeled training utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Utterance text.
    pub text: String,
    /// Binary label.
    pub polarity: Polarity,
}

impl TrainingSample {
    /// Create a training sample.
    pub fn new<S: Into<String>>(text: S, polarity: Polarity) -> Self {
        TrainingSample {
            text: text.into(),
            polarity,
        }
    }

    /// Load training samples from a JSON file
    /// (`[{"text": "...", "polarity": "Affirmative"}, ...]`).
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingSample>> {
        let content = std::fs::read_to_string(path)?;
        let samples: Vec<TrainingSample> = serde_json::from_str(&content)?;
        Ok(samples)
    }
}

/// Binary nearest-centroid classifier over TF-IDF features.
///
/// Training averages the feature vectors of each polarity into a centroid;
/// prediction scores cosine similarity against both centroids. Ties and
/// zero-signal inputs resolve `Negative`: for a command confirmation,
/// declining is the safe forced decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentroidClassifier {
    vectorizer: TfIdfVectorizer,
    affirmative_centroid: Vec<f64>,
    negative_centroid: Vec<f64>,
}

impl CentroidClassifier {
    /// Fit a classifier from labeled samples.
    ///
    /// Returns a `Configuration` error unless both polarities are
    /// represented: a centroid cannot be formed from zero samples.
    pub fn train(samples: &[TrainingSample]) -> Result<Self> {
        let documents: Vec<String> = samples.iter().map(|s| s.text.clone()).collect();
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&documents);

        let affirmative_centroid =
            Self::centroid(&vectorizer, samples, Polarity::Affirmative)?;
        let negative_centroid = Self::centroid(&vectorizer, samples, Polarity::Negative)?;

        Ok(CentroidClassifier {
            vectorizer,
            affirmative_centroid,
            negative_centroid,
        })
    }

    /// Train from the builtin sample set recovered from field data.
    pub fn builtin() -> Result<Self> {
        Self::train(&builtin_training_samples())
    }

    fn centroid(
        vectorizer: &TfIdfVectorizer,
        samples: &[TrainingSample],
        polarity: Polarity,
    ) -> Result<Vec<f64>> {
        let vectors: Vec<Vec<f64>> = samples
            .iter()
            .filter(|s| s.polarity == polarity)
            .map(|s| vectorizer.transform(&s.text))
            .collect();

        if vectors.is_empty() {
            return Err(AssentError::configuration(format!(
                "No training samples with polarity {polarity:?}"
            )));
        }

        let mut centroid = vec![0.0; vectorizer.vocabulary_size()];
        for vector in &vectors {
            for (sum, value) in centroid.iter_mut().zip(vector) {
                *sum += value;
            }
        }
        for sum in &mut centroid {
            *sum /= vectors.len() as f64;
        }
        Ok(centroid)
    }

    /// Write the trained model artifact to disk (bincode).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &(ARTIFACT_VERSION, self))
            .map_err(|e| AssentError::serialization(format!("Failed to write model: {e}")))
    }

    /// Load a model artifact from disk.
    ///
    /// Any failure — missing file, truncated artifact, version mismatch —
    /// is `ModelUnavailable`; the caller must not fall back to guessing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AssentError::model_unavailable(format!(
                "Cannot open model artifact {}: {e}",
                path.display()
            ))
        })?;
        let reader = BufReader::new(file);
        let (version, classifier): (u32, CentroidClassifier) =
            bincode::deserialize_from(reader).map_err(|e| {
                AssentError::model_unavailable(format!(
                    "Cannot decode model artifact {}: {e}",
                    path.display()
                ))
            })?;

        if version != ARTIFACT_VERSION {
            return Err(AssentError::model_unavailable(format!(
                "Model artifact {} has version {version}, expected {ARTIFACT_VERSION}",
                path.display()
            )));
        }
        Ok(classifier)
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
        let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

        if magnitude_a == 0.0 || magnitude_b == 0.0 {
            0.0
        } else {
            dot / (magnitude_a * magnitude_b)
        }
    }
}

impl FallbackClassifier for CentroidClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let features = self.vectorizer.transform(text);
        let affirmative = Self::cosine_similarity(&features, &self.affirmative_centroid);
        let negative = Self::cosine_similarity(&features, &self.negative_centroid);

        // Strict greater-than: ties (including zero-signal inputs) decline.
        let (polarity, confidence) = if affirmative > negative {
            (Polarity::Affirmative, affirmative)
        } else {
            (Polarity::Negative, negative)
        };

        Ok(Prediction {
            polarity,
            confidence,
        })
    }

    fn name(&self) -> &'static str {
        "tfidf-centroid"
    }
}

/// Builtin training samples, taken from the confirmation logs the keyword
/// tables were curated against.
pub fn builtin_training_samples() -> Vec<TrainingSample> {
    use Polarity::{Affirmative, Negative};

    let affirmative = [
        "是的，好的",
        "行，没问题",
        "我可以",
        "马上去做",
        "好呀，开始吧",
        "可以的，启动吧",
        "没问题，搞定它",
        "是的，我会去",
        "确认了，我会处理",
        "当然，开始吧",
        "准备好了，马上进行",
        "就这样定了",
        "我愿意",
        "我支持",
        "完全可以",
        "行，我准备好了",
        "没错，对的",
        "我同意做",
        "ok，开始",
        "yes",
        "sure",
        "alright",
        "no problem",
        "got it",
    ];

    let negative = [
        "不行",
        "不能做",
        "我不愿意",
        "不想做",
        "我不同意",
        "拒绝",
        "不可以这么做",
        "不允许",
        "不行，没法做",
        "不打算",
        "绝对不能",
        "没办法",
        "拒绝接受",
        "我改变主意了",
        "先等等吧",
        "我再想想",
        "这个就先算了",
        "暂时先别开始",
        "no",
        "nope",
        "no way",
        "I refuse",
        "not possible",
        "no thanks",
    ];

    affirmative
        .iter()
        .map(|text| TrainingSample::new(*text, Affirmative))
        .chain(negative.iter().map(|text| TrainingSample::new(*text, Negative)))
        .collect()
}
