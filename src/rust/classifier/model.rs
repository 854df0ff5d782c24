use log::{debug, info};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::params::TrainOptions;
use super::utils::sigmoid;

/// Fitted binary logistic regression: one weight per feature plus a bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Array1<f64>,
    bias: f64,
    /// Iterations the optimizer actually ran.
    n_iter: usize,
}

impl LogisticRegression {
    /// Builds a model from known parameters.
    pub fn from_parameters(weights: Array1<f64>, bias: f64) -> Self {
        Self {
            weights,
            bias,
            n_iter: 0,
        }
    }

    /// Fits the model by minimizing `0.5 * |w|^2 + C * sum(log-loss)`.
    ///
    /// Full-batch gradient descent with a fixed step of `1 / L`, where `L`
    /// bounds the curvature of the objective. The bias is not regularized.
    pub fn fit(
        features: &[Array1<f64>],
        labels: &[u8],
        options: &TrainOptions,
    ) -> Result<Self, ClassifierError> {
        Self::validate_training_data(features, labels)?;
        if !(options.c.is_finite() && options.c > 0.0) {
            return Err(ClassifierError::TrainingError(format!(
                "Regularization parameter C must be positive, got {}",
                options.c
            )));
        }

        let dim = features[0].len();
        let targets: Vec<f64> = labels.iter().map(|&y| f64::from(y)).collect();

        let curvature = 1.0
            + options.c
                * features
                    .iter()
                    .map(|x| x.dot(x) + 1.0)
                    .sum::<f64>()
                / 4.0;
        let step = 1.0 / curvature;
        debug!(
            "Training logistic regression: {} samples, {} features, C={}, step={:.5}",
            features.len(),
            dim,
            options.c,
            step
        );

        let mut weights = Array1::<f64>::zeros(dim);
        let mut bias = 0.0;
        let mut n_iter = 0;

        for iteration in 0..options.max_iter {
            let mut grad_w = weights.clone();
            let mut grad_b = 0.0;
            for (x, &y) in features.iter().zip(&targets) {
                let residual = options.c * (sigmoid(weights.dot(x) + bias) - y);
                grad_w.scaled_add(residual, x);
                grad_b += residual;
            }

            n_iter = iteration + 1;
            let grad_norm = (grad_w.dot(&grad_w) + grad_b * grad_b).sqrt();
            if grad_norm < options.tolerance {
                debug!("Converged after {} iterations (|grad|={:.2e})", n_iter, grad_norm);
                break;
            }

            weights.scaled_add(-step, &grad_w);
            bias -= step * grad_b;
        }

        let model = Self {
            weights,
            bias,
            n_iter,
        };
        info!(
            "Logistic regression fitted in {} iterations, training log-loss {:.4}",
            model.n_iter,
            model.log_loss(features, labels)
        );
        Ok(model)
    }

    /// Raw margin `w . x + b`.
    pub fn decision_function(&self, features: &Array1<f64>) -> Result<f64, ClassifierError> {
        if features.len() != self.weights.len() {
            return Err(ClassifierError::PredictionError(format!(
                "Feature vector has {} dimensions, model expects {}",
                features.len(),
                self.weights.len()
            )));
        }
        Ok(self.weights.dot(features) + self.bias)
    }

    /// Probability of the suspicious class, always within `[0, 1]`.
    pub fn predict_proba(&self, features: &Array1<f64>) -> Result<f64, ClassifierError> {
        self.decision_function(features).map(sigmoid)
    }

    /// Mean binary cross-entropy over a labelled set.
    pub fn log_loss(&self, features: &[Array1<f64>], labels: &[u8]) -> f64 {
        const EPS: f64 = 1e-15;
        if features.is_empty() {
            return 0.0;
        }
        let total: f64 = features
            .iter()
            .zip(labels)
            .map(|(x, &y)| {
                let p = sigmoid(self.weights.dot(x) + self.bias).clamp(EPS, 1.0 - EPS);
                if y == 1 {
                    -p.ln()
                } else {
                    -(1.0 - p).ln()
                }
            })
            .sum();
        total / features.len() as f64
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    fn validate_training_data(features: &[Array1<f64>], labels: &[u8]) -> Result<(), ClassifierError> {
        if features.is_empty() {
            return Err(ClassifierError::TrainingError("Empty training set".into()));
        }
        if features.len() != labels.len() {
            return Err(ClassifierError::TrainingError(format!(
                "Mismatched training inputs/labels: {} vs {}",
                features.len(),
                labels.len()
            )));
        }
        if let Some(pos) = labels.iter().position(|&y| y > 1) {
            return Err(ClassifierError::TrainingError(format!(
                "Label at position {} must be 0 or 1, got {}",
                pos, labels[pos]
            )));
        }
        if !(labels.contains(&0) && labels.contains(&1)) {
            return Err(ClassifierError::TrainingError(
                "Training set must contain both classes".into(),
            ));
        }
        let dim = features[0].len();
        if features.iter().any(|x| x.len() != dim) {
            return Err(ClassifierError::TrainingError(
                "Inconsistent feature vector length".into(),
            ));
        }
        Ok(())
    }
}
