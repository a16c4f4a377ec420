//! Wraps the segmenter and rejects queries with repeated terms.

use std::sync::Arc;

use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;
use crate::record::Record;
use crate::weight::types::{QueryItem, TermWeight};

/// Segments query text into unique, ordered terms.
///
/// A query whose segmentation repeats a term cannot be weighted by position,
/// so it is reported as invalid rather than deduplicated.
#[derive(Clone)]
pub struct QueryTokenizer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for QueryTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryTokenizer")
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl QueryTokenizer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        QueryTokenizer { tokenizer }
    }

    /// Name of the wrapped segmenter.
    pub fn name(&self) -> &'static str {
        self.tokenizer.name()
    }

    /// Segment `text`, dropping blank terms.
    ///
    /// Returns `Ok(None)` when a term occurs more than once.
    pub fn tokenize(&self, text: &str) -> Result<Option<Vec<String>>> {
        let mut terms: Vec<String> = Vec::new();
        for token in self.tokenizer.tokenize(text)? {
            if token.is_blank() {
                continue;
            }
            if terms.contains(&token.text) {
                return Ok(None);
            }
            terms.push(token.text);
        }
        Ok(Some(terms))
    }

    /// Segment an item in place. Returns whether the item is valid.
    pub fn tokenize_item(&self, item: &mut QueryItem) -> Result<bool> {
        item.terms = self
            .tokenize(&item.query)?
            .map(|terms| terms.into_iter().map(TermWeight::unweighted).collect());
        Ok(item.is_valid())
    }

    /// Turn a cluster of records into segmented items.
    ///
    /// Invalid items are left out; the second value counts them.
    pub fn tokenize_cluster(&self, records: Vec<Record>) -> Result<(Vec<QueryItem>, usize)> {
        let mut items = Vec::with_capacity(records.len());
        let mut rejected = 0;
        for record in records {
            let mut item = QueryItem::new(record.query, record.frequency);
            if self.tokenize_item(&mut item)? {
                items.push(item);
            } else {
                log::debug!("Dropping query with repeated terms: {}", item.query);
                rejected += 1;
            }
        }
        Ok((items, rejected))
    }
}
