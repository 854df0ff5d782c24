use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::model::LogisticRegression;
use super::vectorizer::TfidfVectorizer;

/// Confidence above which a message is reported as suspicious.
pub const SUSPICIOUS_THRESHOLD: f64 = 0.7;

/// A fitted vectorizer and model, scored together.
///
/// The bundle is immutable once built. It serializes to an object with exactly
/// two fields, `model` and `vectorizer`, which is the persisted artifact format.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use drugwatch::ClassifierBundle;
///
/// let classifier = ClassifierBundle::builder().with_corpus().build()?;
/// let confidence = classifier.predict("need plug in nyc dm for menu")?;
/// assert!(confidence > 0.5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierBundle {
    pub model: LogisticRegression,
    pub vectorizer: TfidfVectorizer,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ClassifierBundle>();
    }
};

/// Probability of the suspicious class plus the thresholded verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub confidence: f64,
    #[serde(rename = "isSuspicious")]
    pub is_suspicious: bool,
}

impl Prediction {
    /// `is_suspicious` is true only when `confidence` is strictly above `threshold`.
    pub fn new(confidence: f64, threshold: f64) -> Self {
        Self {
            confidence,
            is_suspicious: confidence > threshold,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_suspicious { "suspicious" } else { "benign" };
        write!(f, "{} (confidence {:.3})", verdict, self.confidence)
    }
}

/// Summary of a fitted classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierInfo {
    pub num_features: usize,
    pub ngram_range: (usize, usize),
    pub bias: f64,
    pub iterations: usize,
}

impl ClassifierBundle {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Pairs an already fitted vectorizer and model.
    pub fn new(vectorizer: TfidfVectorizer, model: LogisticRegression) -> Result<Self, ClassifierError> {
        let bundle = Self { model, vectorizer };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Checks that the model was fitted on this vectorizer's feature space.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !self.vectorizer.is_consistent() {
            return Err(ClassifierError::ValidationError(
                "Vectorizer vocabulary and IDF table disagree".into(),
            ));
        }
        if self.model.num_features() != self.vectorizer.num_features() {
            return Err(ClassifierError::ValidationError(format!(
                "Model has {} weights but vectorizer has {} features",
                self.model.num_features(),
                self.vectorizer.num_features()
            )));
        }
        Ok(())
    }

    /// Feature vector for `text` in the fitted vocabulary.
    pub fn transform(&self, text: &str) -> Array1<f64> {
        self.vectorizer.transform(text)
    }

    /// Probability that `text` is suspicious.
    pub fn predict(&self, text: &str) -> Result<f64, ClassifierError> {
        let features = self.transform(text);
        self.model.predict_proba(&features)
    }

    /// Scores `text` and applies `threshold`.
    pub fn classify(&self, text: &str, threshold: f64) -> Result<Prediction, ClassifierError> {
        self.predict(text).map(|confidence| Prediction::new(confidence, threshold))
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            num_features: self.vectorizer.num_features(),
            ngram_range: self.vectorizer.params().ngram_range,
            bias: self.model.bias(),
            iterations: self.model.n_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::params::VectorizerParams;

    fn small_bundle() -> ClassifierBundle {
        let texts = ["plug weed", "garden plants"];
        let vectorizer = TfidfVectorizer::fit(&texts, VectorizerParams::default());
        let weights = Array1::from_shape_fn(vectorizer.num_features(), |idx| {
            let plug = vectorizer.vocabulary()["plug"];
            if idx == plug { 4.0 } else { 0.0 }
        });
        ClassifierBundle::new(vectorizer, LogisticRegression::from_parameters(weights, -1.0)).unwrap()
    }

    #[test]
    fn test_prediction_threshold_is_strict() {
        assert!(!Prediction::new(0.7, SUSPICIOUS_THRESHOLD).is_suspicious);
        assert!(Prediction::new(0.7001, SUSPICIOUS_THRESHOLD).is_suspicious);
    }

    #[test]
    fn test_prediction_serializes_with_wire_names() {
        let json = serde_json::to_value(Prediction::new(0.9, SUSPICIOUS_THRESHOLD)).unwrap();
        assert_eq!(json["confidence"], 0.9);
        assert_eq!(json["isSuspicious"], true);
    }

    #[test]
    fn test_classify_uses_threshold() {
        let bundle = small_bundle();
        let hot = bundle.classify("plug", 0.5).unwrap();
        let cold = bundle.classify("garden", 0.5).unwrap();
        assert!(hot.is_suspicious);
        assert!(!cold.is_suspicious);
        assert!(hot.confidence > cold.confidence);
    }

    #[test]
    fn test_new_rejects_mismatched_dimensions() {
        let vectorizer = TfidfVectorizer::fit(&["plug weed"], VectorizerParams::default());
        let model = LogisticRegression::from_parameters(Array1::zeros(1), 0.0);
        assert!(matches!(
            ClassifierBundle::new(vectorizer, model),
            Err(ClassifierError::ValidationError(_))
        ));
    }

    #[test]
    fn test_bundle_serializes_two_named_fields() {
        let json = serde_json::to_value(small_bundle()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("model"));
        assert!(object.contains_key("vectorizer"));
    }

    #[test]
    fn test_info() {
        let info = small_bundle().info();
        assert_eq!(info.ngram_range, (1, 3));
        assert_eq!(info.bias, -1.0);
        assert_eq!(info.num_features, 6);
    }
}
