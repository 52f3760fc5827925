//! End-to-end classification: normalize, vectorize, predict

use crate::error::{ClassifierError, Result};
use crate::model::LinearClassifier;
use crate::normalize::Normalizer;
use crate::types::{Prediction, RawEmail};
use crate::vectorize::CountVectorizer;
use tracing::debug;

/// The assembled prediction pipeline
///
/// All three stages are read-only after construction, so one pipeline can
/// serve concurrent requests without locking.
#[derive(Debug)]
pub struct SpamPipeline {
    normalizer: Normalizer,
    vectorizer: CountVectorizer,
    classifier: LinearClassifier,
}

impl SpamPipeline {
    /// Compose the three stages, verifying the vectorizer and classifier
    /// agree on the feature dimension
    pub fn new(
        normalizer: Normalizer,
        vectorizer: CountVectorizer,
        classifier: LinearClassifier,
    ) -> Result<Self> {
        let vocabulary_size = vectorizer.vocabulary().size();
        let expected = vectorizer.vocabulary().dimension();
        if classifier.dimension() != expected {
            return Err(ClassifierError::DimensionMismatch {
                vocabulary_size,
                expected,
                found: classifier.dimension(),
            });
        }
        Ok(Self {
            normalizer,
            vectorizer,
            classifier,
        })
    }

    /// Classify plain email content
    #[must_use]
    pub fn classify(&self, content: &str) -> Prediction {
        self.classify_email(&RawEmail::Text(content))
    }

    /// Classify a raw RFC 5322 message
    #[must_use]
    pub fn classify_message(&self, raw: &[u8]) -> Prediction {
        self.classify_email(&RawEmail::Message(raw))
    }

    /// Classify any raw email input
    #[must_use]
    pub fn classify_email(&self, email: &RawEmail) -> Prediction {
        let counts = self.normalizer.normalize(email);
        let features = self.vectorizer.transform(&counts);
        let prediction = self.classifier.predict(&features);

        debug!(
            classification = prediction.classification,
            probability = prediction.probability,
            distinct_tokens = counts.len(),
            "Classified email"
        );
        prediction
    }

    /// Classify a batch of plain contents, one result per input, order
    /// preserved
    #[must_use]
    pub fn classify_batch(&self, contents: &[&str]) -> Vec<Prediction> {
        contents.iter().map(|content| self.classify(content)).collect()
    }

    #[must_use]
    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    #[must_use]
    pub const fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }

    #[must_use]
    pub const fn classifier(&self) -> &LinearClassifier {
        &self.classifier
    }
}
