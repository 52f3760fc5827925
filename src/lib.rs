// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Spam Classifier
//!
//! A deterministic email-to-feature pipeline feeding a pre-fit logistic
//! classifier. Raw email content — plain text or a full MIME message — is
//! normalized into a token multiset, vectorized against a fixed vocabulary,
//! and scored into a spam probability and binary label.
//!
//! # Features
//!
//! - MIME-aware body extraction with HTML-to-text conversion
//! - URL / number sentinel substitution and Porter stemming
//! - Fixed-dimension sparse count vectors with an out-of-vocabulary slot
//! - Versioned model artifacts validated fail-fast at load time
//! - Pure, lock-free pipeline safe for concurrent requests
//!
//! # Example
//!
//! ```rust
//! use spam_classifier::{CountVectorizer, LinearClassifier, NormalizeOptions, Normalizer, SpamPipeline};
//!
//! let normalizer = Normalizer::new(NormalizeOptions::default());
//! let corpus = [
//!     normalizer.normalize_text("win a free prize now"),
//!     normalizer.normalize_text("the quarterly report is attached"),
//! ];
//! let vectorizer = CountVectorizer::fit(&corpus, 50);
//! let weights = vec![0.0; vectorizer.vocabulary().dimension()];
//! let classifier = LinearClassifier::new(weights, 0.0, vectorizer.vocabulary().size()).unwrap();
//!
//! let pipeline = SpamPipeline::new(normalizer, vectorizer, classifier).unwrap();
//! let prediction = pipeline.classify("You have won a free prize!");
//! assert!((0.0..=1.0).contains(&prediction.probability));
//! ```

mod artifact;
mod error;
mod model;
mod normalize;
mod pipeline;
mod types;
mod vectorize;

pub use artifact::{FORMAT_VERSION, ModelArtifact};
pub use error::{ClassifierError, Result};
pub use model::LinearClassifier;
pub use normalize::{NormalizeOptions, Normalizer, html_to_plain_text};
pub use pipeline::SpamPipeline;
pub use types::{Prediction, RawEmail, SparseVector, TokenCounts};
pub use vectorize::{CountVectorizer, FIT_COUNT_CAP, Vocabulary};
