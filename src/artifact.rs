//! Versioned model artifact pairing a vocabulary with the classifier
//! parameters it was trained alongside
//!
//! The artifact is a single JSON document produced by the offline training
//! collaborator. Loading validates every dimensional invariant before a
//! pipeline is built, so a mismatched vocabulary/weight pair refuses to serve
//! instead of emitting silently wrong probabilities.

use crate::error::{ClassifierError, Result};
use crate::model::LinearClassifier;
use crate::normalize::{NormalizeOptions, Normalizer};
use crate::pipeline::SpamPipeline;
use crate::vectorize::{CountVectorizer, Vocabulary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Artifact revision this crate reads and writes
pub const FORMAT_VERSION: u32 = 1;

/// Serialized model: vocabulary, weights, bias, and the normalization
/// configuration the vocabulary was fit under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,

    /// When the training collaborator produced this artifact
    pub trained_at: DateTime<Utc>,

    /// Declared vocabulary size (V)
    pub vocabulary_size: usize,

    /// Index-sorted token list: position `i` holds the token with index `i+1`
    pub vocabulary: Vec<String>,

    /// Weight vector of length V + 1; slot 0 is the out-of-vocabulary weight
    pub weights: Vec<f64>,

    pub bias: f64,

    #[serde(default)]
    pub normalize_options: NormalizeOptions,
}

impl ModelArtifact {
    /// Assemble an artifact from fit components (training-side convenience)
    #[must_use]
    pub fn from_parts(
        vocabulary: &Vocabulary,
        weights: Vec<f64>,
        bias: f64,
        normalize_options: NormalizeOptions,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            trained_at: Utc::now(),
            vocabulary_size: vocabulary.size(),
            vocabulary: vocabulary.to_token_list(),
            weights,
            bias,
            normalize_options,
        }
    }

    /// Read and decode an artifact file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read(path)?;
        Self::from_slice(&raw)
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        Ok(serde_json::to_writer(writer, self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let encoded = serde_json::to_vec_pretty(self)?;
        Ok(std::fs::write(path, encoded)?)
    }

    /// Check every startup invariant without building a pipeline
    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(ClassifierError::UnsupportedVersion(self.format_version));
        }
        if self.vocabulary.len() != self.vocabulary_size {
            return Err(ClassifierError::VocabularyInvariant(format!(
                "declared size {} but {} tokens listed",
                self.vocabulary_size,
                self.vocabulary.len()
            )));
        }
        let expected = self.vocabulary_size + 1;
        if self.weights.len() != expected {
            return Err(ClassifierError::DimensionMismatch {
                vocabulary_size: self.vocabulary_size,
                expected,
                found: self.weights.len(),
            });
        }
        if let Some(position) = self.weights.iter().position(|w| !w.is_finite()) {
            return Err(ClassifierError::NonFiniteParameter(format!(
                "weight at index {position}"
            )));
        }
        if !self.bias.is_finite() {
            return Err(ClassifierError::NonFiniteParameter("bias".into()));
        }
        Ok(())
    }

    /// Validate and build the serving pipeline
    ///
    /// Duplicate vocabulary tokens are rejected here, completing the
    /// dense-index invariant check.
    pub fn into_pipeline(self) -> Result<SpamPipeline> {
        self.validate()?;

        let vocabulary_size = self.vocabulary_size;
        let vocabulary = Vocabulary::from_tokens(self.vocabulary)?;
        let classifier = LinearClassifier::new(self.weights, self.bias, vocabulary_size)?;
        let normalizer = Normalizer::new(self.normalize_options);

        debug!(vocabulary_size, "Model artifact loaded");

        SpamPipeline::new(normalizer, CountVectorizer::new(vocabulary), classifier)
    }
}
