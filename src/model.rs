//! Linear classifier inference over sparse count vectors

use crate::error::{ClassifierError, Result};
use crate::types::{Prediction, SparseVector};

/// Pre-fit logistic-regression parameters: one weight per feature slot plus a
/// bias
///
/// Pure function once constructed; no mutable state across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearClassifier {
    /// Build from externally fit parameters, validating that the weight
    /// vector matches the vocabulary it was trained alongside
    pub fn new(weights: Vec<f64>, bias: f64, vocabulary_size: usize) -> Result<Self> {
        let expected = vocabulary_size + 1;
        if weights.len() != expected {
            return Err(ClassifierError::DimensionMismatch {
                vocabulary_size,
                expected,
                found: weights.len(),
            });
        }
        if let Some(position) = weights.iter().position(|w| !w.is_finite()) {
            return Err(ClassifierError::NonFiniteParameter(format!(
                "weight at index {position}"
            )));
        }
        if !bias.is_finite() {
            return Err(ClassifierError::NonFiniteParameter("bias".into()));
        }
        Ok(Self { weights, bias })
    }

    /// Feature-vector length this classifier expects (V + 1)
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub const fn bias(&self) -> f64 {
        self.bias
    }

    /// Predict spam probability and label for one feature vector
    ///
    /// classification is 1 exactly when probability >= 0.5, the decision rule
    /// the external trainer used.
    #[must_use]
    pub fn predict(&self, features: &SparseVector) -> Prediction {
        let probability = sigmoid(self.score(features));
        Prediction {
            classification: u8::from(probability >= 0.5),
            probability,
        }
    }

    /// Predict for a batch, one result per input, order preserved
    #[must_use]
    pub fn predict_batch(&self, batch: &[SparseVector]) -> Vec<Prediction> {
        batch.iter().map(|features| self.predict(features)).collect()
    }

    fn score(&self, features: &SparseVector) -> f64 {
        debug_assert_eq!(features.dim(), self.weights.len());
        features
            .iter()
            .map(|(index, value)| self.weights[index] * f64::from(value))
            .sum::<f64>()
            + self.bias
    }
}

/// Logistic function, mapping any score into (0, 1)
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
