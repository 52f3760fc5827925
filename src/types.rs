//! Core types shared across the pipeline stages

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw email input as handed to the pipeline
///
/// Either already-extracted plain content, or a full RFC 5322 message whose
/// body still needs to be located.
#[derive(Debug, Clone, Copy)]
pub enum RawEmail<'a> {
    /// Plain text content (possibly containing inline HTML markup)
    Text(&'a str),

    /// Raw message bytes, parsed with `mailparse` during normalization
    Message(&'a [u8]),
}

/// Multiset of clean tokens produced by the normalizer for one email
///
/// Backed by an ordered map so iteration order, and everything derived from
/// it, is deterministic for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounts(BTreeMap<String, u32>);

impl TokenCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a token
    pub fn add(&mut self, token: impl Into<String>) {
        self.add_count(token, 1);
    }

    /// Record `count` occurrences of a token
    pub fn add_count(&mut self, token: impl Into<String>, count: u32) {
        *self.0.entry(token.into()).or_insert(0) += count;
    }

    /// Occurrence count for a token, zero if absent
    #[must_use]
    pub fn get(&self, token: &str) -> u32 {
        self.0.get(token).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains_key(token)
    }

    /// Number of distinct tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (token, count) pairs in token order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// Distinct tokens in token order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, u32)> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (token, count) in iter {
            counts.add_count(token, count);
        }
        counts
    }
}

/// Sparse feature vector for one email
///
/// Logical length is `dim` (vocabulary size + 1); only non-zero slots are
/// stored, as parallel index/value arrays sorted by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<u32>,
    dim: usize,
}

impl SparseVector {
    /// Build from (index, value) entries; duplicate indices are summed and
    /// zero values dropped
    #[must_use]
    pub fn from_entries(dim: usize, entries: impl IntoIterator<Item = (usize, u32)>) -> Self {
        let mut slots: BTreeMap<usize, u32> = BTreeMap::new();
        for (index, value) in entries {
            debug_assert!(index < dim, "feature index {index} out of range for dim {dim}");
            if value > 0 {
                *slots.entry(index).or_insert(0) += value;
            }
        }
        let (indices, values) = slots.into_iter().unzip();
        Self {
            indices,
            values,
            dim,
        }
    }

    /// All-zero vector of the given logical length
    #[must_use]
    pub const fn zeros(dim: usize) -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
            dim,
        }
    }

    /// Logical length of the vector
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of non-zero slots
    #[must_use]
    pub const fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Value at `index`, zero if not stored
    #[must_use]
    pub fn get(&self, index: usize) -> u32 {
        self.indices
            .binary_search(&index)
            .map_or(0, |pos| self.values[pos])
    }

    /// Iterate over (index, value) pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> {
        self.indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Materialize as a dense vector of length `dim`
    #[must_use]
    pub fn to_dense(&self) -> Vec<u32> {
        let mut dense = vec![0; self.dim];
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }
}

/// Classification outcome for one email
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// 1 for spam, 0 for ham
    pub classification: u8,

    /// Model's estimated probability that the email is spam
    pub probability: f64,
}

impl Prediction {
    #[must_use]
    pub const fn is_spam(&self) -> bool {
        self.classification == 1
    }
}
