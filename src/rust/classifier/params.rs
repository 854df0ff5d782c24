use serde::{Deserialize, Serialize};

use super::error::ClassifierError;

/// Settings for the TF-IDF feature extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Smallest and largest n-gram length, inclusive.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents an n-gram must appear in to enter the vocabulary.
    pub min_df: usize,
}

impl VectorizerParams {
    pub fn new(ngram_range: (usize, usize), min_df: usize) -> Result<Self, ClassifierError> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::ValidationError(format!(
                "Invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        if min_df == 0 {
            return Err(ClassifierError::ValidationError("min_df must be at least 1".into()));
        }
        Ok(Self { ngram_range, min_df })
    }
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            ngram_range: (1, 3),
            min_df: 1,
        }
    }
}

/// Optimizer settings for the logistic regression head.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOptions {
    /// Upper bound on gradient descent iterations.
    pub max_iter: usize,
    /// Inverse regularization strength; larger values fit the training set harder.
    pub c: f64,
    /// Stop once the gradient norm falls below this.
    pub tolerance: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            c: 10.0,
            tolerance: 1e-6,
        }
    }
}
