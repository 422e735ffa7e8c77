//! Per-month term weighting.
//!
//! Each month gets its own [`TfIdfIndex`]; a message is one document. A
//! term's weight is its tf × idf summed over the month's documents, with
//! `tf = count / document length` and `idf = 1 + ln(N / (1 + df))`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::text::topic_terms;

/// A ranked term and its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

/// Document collection ranked by tf-idf.
///
/// # Example
///
/// ```rust
/// use chatpulse::analysis::topics::TfIdfIndex;
///
/// let mut index = TfIdfIndex::new();
/// index.add_document("pizza tonight?");
/// index.add_document("pizza again, then movies");
/// index.add_document("movies are fine");
///
/// let top = index.top_terms(2);
/// assert_eq!(top[0].term, "movies");
/// assert_eq!(top[1].term, "pizza");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    documents: Vec<Vec<String>>,
}

impl TfIdfIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes `text` and stores it as a document. Stop words, numbers and
    /// one-letter tokens are dropped; a document left empty still counts
    /// toward `N`.
    pub fn add_document(&mut self, text: &str) {
        self.documents.push(topic_terms(text));
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of documents containing each term.
    fn document_frequencies(&self) -> BTreeMap<&str, usize> {
        let mut df = BTreeMap::new();
        for doc in &self.documents {
            let unique: BTreeSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }
        df
    }

    /// Weight of every term in the collection.
    pub fn weights(&self) -> BTreeMap<String, f64> {
        let n = self.documents.len() as f64;
        let idf: BTreeMap<&str, f64> = self
            .document_frequencies()
            .into_iter()
            .map(|(term, df)| (term, 1.0 + (n / (1.0 + df as f64)).ln()))
            .collect();

        let mut weights: BTreeMap<String, f64> = BTreeMap::new();
        for doc in self.documents.iter().filter(|d| !d.is_empty()) {
            let len = doc.len() as f64;
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for term in doc {
                *counts.entry(term.as_str()).or_insert(0) += 1;
            }
            for (term, count) in counts {
                let tf = count as f64 / len;
                *weights.entry(term.to_string()).or_insert(0.0) += tf * idf[term];
            }
        }
        weights
    }

    /// The `n` heaviest terms, heaviest first; equal weights sort by term.
    pub fn top_terms(&self, n: usize) -> Vec<TermWeight> {
        let mut ranked: Vec<TermWeight> = self
            .weights()
            .into_iter()
            .map(|(term, weight)| TermWeight { term, weight })
            .collect();
        ranked.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then_with(|| a.term.cmp(&b.term))
        });
        ranked.truncate(n);
        ranked
    }
}
