//! Data carried through the weighting stages.

use serde::{Deserialize, Serialize};

/// A term and its importance within one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

impl TermWeight {
    pub fn new<S: Into<String>>(term: S, weight: f64) -> Self {
        TermWeight {
            term: term.into(),
            weight,
        }
    }

    /// A term with zero weight.
    pub fn unweighted<S: Into<String>>(term: S) -> Self {
        Self::new(term, 0.0)
    }
}

/// A query observed under one click target.
///
/// `terms` is `None` until the query has been segmented, and stays `None` when
/// segmentation produced a repeated term. Such items take no further part in
/// weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryItem {
    pub query: String,
    pub frequency: u64,
    pub terms: Option<Vec<TermWeight>>,
}

impl QueryItem {
    /// Create an item that has not been segmented yet.
    pub fn new<S: Into<String>>(query: S, frequency: u64) -> Self {
        QueryItem {
            query: query.into(),
            frequency,
            terms: None,
        }
    }

    /// Create an item with the given terms, all unweighted.
    pub fn with_terms<S, I, T>(query: S, frequency: u64, terms: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        QueryItem {
            query: query.into(),
            frequency,
            terms: Some(terms.into_iter().map(TermWeight::unweighted).collect()),
        }
    }

    /// Whether segmentation succeeded for this item.
    pub fn is_valid(&self) -> bool {
        self.terms.is_some()
    }

    /// The segmented terms, or an empty slice for invalid items.
    pub fn terms(&self) -> &[TermWeight] {
        self.terms.as_deref().unwrap_or(&[])
    }

    /// Look up the weight of a term.
    pub fn weight_of(&self, term: &str) -> Option<f64> {
        self.terms().iter().find(|t| t.term == term).map(|t| t.weight)
    }
}

/// The reconciled weights for one normalized query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedQuery {
    /// Normalized query text
    pub query: String,
    /// Sum of the frequencies of every contributing item
    pub total_frequency: u128,
    pub terms: Vec<TermWeight>,
}

impl WeightedQuery {
    /// Look up the weight of a term.
    pub fn weight_of(&self, term: &str) -> Option<f64> {
        self.terms.iter().find(|t| t.term == term).map(|t| t.weight)
    }
}
