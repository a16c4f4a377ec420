//! Run-wide accumulator of accepted query items.
//!
//! Items are keyed by normalized query text so that estimates for the same
//! query from different click targets end up side by side for the merge pass.
//! Keys iterate in byte order, which keeps the output of a run deterministic.

use std::collections::BTreeMap;

use crate::weight::types::QueryItem;

/// Normalize query text into a merge key: lowercased, whitespace removed.
pub fn normalize_query(query: &str) -> String {
    query
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accepted query items grouped by normalized text.
#[derive(Debug, Clone, Default)]
pub struct QueryGroup {
    entries: BTreeMap<String, Vec<QueryItem>>,
    item_count: usize,
}

impl QueryGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item under its normalized text.
    pub fn add(&mut self, item: QueryItem) {
        self.entries
            .entry(normalize_query(&item.query))
            .or_default()
            .push(item);
        self.item_count += 1;
    }

    /// Append every item of an accepted cluster.
    pub fn add_cluster<I: IntoIterator<Item = QueryItem>>(&mut self, items: I) {
        for item in items {
            self.add(item);
        }
    }

    /// Items recorded for a normalized key.
    pub fn get(&self, key: &str) -> Option<&[QueryItem]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Iterate over keys and their items in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[QueryItem])> {
        self.entries
            .iter()
            .map(|(key, items)| (key.as_str(), items.as_slice()))
    }

    /// Number of distinct normalized query texts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of items across all keys.
    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("Red Car"), "redcar");
        assert_eq!(normalize_query(" red\tcar "), "redcar");
        assert_eq!(normalize_query("北京 天气"), "北京天气");
    }

    #[test]
    fn test_items_with_same_normalized_text_share_a_key() {
        let mut group = QueryGroup::new();
        group.add_cluster(vec![
            QueryItem::with_terms("red car", 3, ["red", "car"]),
            QueryItem::with_terms("car", 5, ["car"]),
        ]);
        group.add(QueryItem::with_terms("redcar", 2, ["red", "car"]));

        assert_eq!(group.len(), 2);
        assert_eq!(group.item_count(), 3);
        assert_eq!(group.get("redcar").unwrap().len(), 2);

        let keys: Vec<_> = group.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["car", "redcar"]);
    }
}
