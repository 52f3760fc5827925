//! Word-count vectorization against a fixed vocabulary

use crate::error::{ClassifierError, Result};
use crate::types::{SparseVector, TokenCounts};
use std::collections::HashMap;

/// Per-email count cap applied when aggregating corpus statistics during
/// fitting, limiting the influence of any single email on vocabulary ranking
pub const FIT_COUNT_CAP: u32 = 10;

/// Immutable token-to-index mapping
///
/// Indices are dense over `1..=size`; index 0 is reserved for tokens not in
/// the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    size: usize,
}

impl Vocabulary {
    /// Build from an index-sorted token list: position `i` is assigned index
    /// `i + 1`
    pub fn from_tokens(tokens: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut index = HashMap::new();
        let mut size = 0;
        for (position, token) in tokens.into_iter().enumerate() {
            if index.insert(token.clone(), position + 1).is_some() {
                return Err(ClassifierError::VocabularyInvariant(format!(
                    "duplicate token: {token:?}"
                )));
            }
            size = position + 1;
        }
        Ok(Self { index, size })
    }

    /// Number of tokens with an assigned index (V)
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Feature-vector length: V + 1, including the out-of-vocabulary slot
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.size + 1
    }

    /// Index for a token; 0 when the token is out of vocabulary
    #[must_use]
    pub fn index_of(&self, token: &str) -> usize {
        self.index.get(token).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Tokens in index order, suitable for artifact serialization
    #[must_use]
    pub fn to_token_list(&self) -> Vec<String> {
        let mut tokens = vec![String::new(); self.size];
        for (token, &idx) in &self.index {
            tokens[idx - 1] = token.clone();
        }
        tokens
    }
}

/// Maps token multisets to sparse count vectors using a pre-fit vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountVectorizer {
    vocabulary: Vocabulary,
}

impl CountVectorizer {
    /// Wrap an externally fit vocabulary
    #[must_use]
    pub const fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Fit a vocabulary over a training corpus (training-side operation)
    ///
    /// Per-token counts are aggregated across the corpus with each email's
    /// contribution capped at [`FIT_COUNT_CAP`]; tokens are ranked by total
    /// count descending, ties broken by first appearance in the aggregation
    /// sequence, and the top `vocabulary_size` tokens get indices `1..=V`.
    /// A corpus with fewer distinct tokens yields a smaller vocabulary.
    #[must_use]
    pub fn fit(corpus: &[TokenCounts], vocabulary_size: usize) -> Self {
        let mut totals: HashMap<&str, (u64, usize)> = HashMap::new();
        let mut next_rank = 0;

        for counts in corpus {
            for (token, count) in counts.iter() {
                let capped = u64::from(count.min(FIT_COUNT_CAP));
                totals
                    .entry(token)
                    .and_modify(|(total, _)| *total += capped)
                    .or_insert_with(|| {
                        let entry = (capped, next_rank);
                        next_rank += 1;
                        entry
                    });
            }
        }

        let mut ranked: Vec<(&str, u64, usize)> = totals
            .into_iter()
            .map(|(token, (total, first_seen))| (token, total, first_seen))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(vocabulary_size);

        let index: HashMap<String, usize> = ranked
            .iter()
            .enumerate()
            .map(|(position, (token, _, _))| ((*token).to_string(), position + 1))
            .collect();
        let size = index.len();

        Self {
            vocabulary: Vocabulary { index, size },
        }
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Transform one token multiset into a sparse count vector
    ///
    /// Pure function of the multiset and the vocabulary; out-of-vocabulary
    /// tokens accumulate in slot 0.
    #[must_use]
    pub fn transform(&self, counts: &TokenCounts) -> SparseVector {
        SparseVector::from_entries(
            self.vocabulary.dimension(),
            counts
                .iter()
                .map(|(token, count)| (self.vocabulary.index_of(token), count)),
        )
    }

    /// Transform a batch, one vector per email, input order preserved
    #[must_use]
    pub fn transform_batch(&self, corpus: &[TokenCounts]) -> Vec<SparseVector> {
        corpus.iter().map(|counts| self.transform(counts)).collect()
    }
}
