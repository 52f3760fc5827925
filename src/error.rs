//! Error types for the classification core

use thiserror::Error;

/// Errors that can occur while loading model artifacts or serving requests
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Failed to read or write an artifact on storage
    #[error("Artifact I/O error: {0}")]
    ArtifactIo(#[from] std::io::Error),

    /// Artifact payload could not be decoded
    #[error("Failed to decode model artifact: {0}")]
    ArtifactFormat(#[from] serde_json::Error),

    /// Artifact was written by an incompatible format revision
    #[error("Unsupported artifact format version: {0}")]
    UnsupportedVersion(u32),

    /// Vocabulary size and weight-vector length disagree
    #[error(
        "Dimension mismatch: vocabulary of size {vocabulary_size} requires \
         {expected} weights, found {found}"
    )]
    DimensionMismatch {
        vocabulary_size: usize,
        expected: usize,
        found: usize,
    },

    /// Vocabulary violates the dense-index invariant
    #[error("Invalid vocabulary: {0}")]
    VocabularyInvariant(String),

    /// A weight or the bias is NaN or infinite
    #[error("Non-finite model parameter: {0}")]
    NonFiniteParameter(String),

    /// Request rejected before entering the pipeline
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for classification operations
pub type Result<T> = std::result::Result<T, ClassifierError>;
