//! TF-IDF index over the catalog's composite text.
//!
//! Vocabulary selection ranks terms by corpus-wide count, breaking ties by
//! term order, keeps the top `max_features`, then assigns columns in term
//! order. Weights are `count * idf` with smoothed idf, and every row is
//! L2-normalized.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::RecommenderError;
use crate::services::text::tokenize;

pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Sparse row of `(column, weight)` pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_map(weights: BTreeMap<usize, f64>) -> Self {
        Self {
            entries: weights.into_iter().collect(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product via a merge over the sorted column lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ci, wi) = self.entries[i];
            let (cj, wj) = other.entries[j];
            match ci.cmp(&cj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Read-only term-weight matrix plus its vocabulary
#[derive(Debug, Clone)]
pub struct VectorIndex {
    rows: Vec<SparseVector>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl VectorIndex {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub(crate) fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Rows with no vocabulary term; they score 0 against everything
    pub fn empty_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.is_zero()).count()
    }

    #[cfg(test)]
    pub(crate) fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&col| self.idf[col])
    }
}

/// Builder for [`VectorIndex`]
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    /// Caps the vocabulary; `0` keeps every term
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn build<S: AsRef<str>>(&self, documents: &[S]) -> Result<VectorIndex, RecommenderError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                *term_counts.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(RecommenderError::EmptyCorpus);
        }

        let mut ranked: Vec<(&str, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if self.max_features > 0 {
            ranked.truncate(self.max_features);
        }

        let mut terms: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.to_string(), col))
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
                for token in tokens {
                    if let Some(&col) = vocabulary.get(token) {
                        *counts.entry(col).or_insert(0.0) += 1.0;
                    }
                }
                for (col, weight) in counts.iter_mut() {
                    *weight *= idf[*col];
                }
                let mut row = SparseVector::from_map(counts);
                row.normalize();
                row
            })
            .collect();

        Ok(VectorIndex {
            rows,
            vocabulary,
            idf,
        })
    }
}
