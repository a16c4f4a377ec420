//! Reconciles the estimates of one query text across click targets.
//!
//! Each contributing item is weighted by its share of the total frequency. The
//! items must agree on the term at every position; if any position disagrees
//! the query is rejected as inconsistent and no weights are produced for it.

use rayon::prelude::*;

use crate::weight::group::QueryGroup;
use crate::weight::types::{QueryItem, TermWeight, WeightedQuery};

/// Result of merging the items recorded for one normalized query text.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// Weights were merged.
    Merged(WeightedQuery),
    /// Contributing items segment the query differently.
    Inconsistent { query: String, items: Vec<QueryItem> },
    /// The first item carries no terms, so there is nothing to align against.
    Skipped { query: String },
}

impl MergeOutcome {
    pub fn query(&self) -> &str {
        match self {
            MergeOutcome::Merged(merged) => &merged.query,
            MergeOutcome::Inconsistent { query, .. } | MergeOutcome::Skipped { query } => query,
        }
    }
}

/// Merge the items recorded for `query`.
///
/// Returns `None` for an empty item list.
pub fn merge_query(query: &str, items: &[QueryItem]) -> Option<MergeOutcome> {
    let first = items.first()?;
    let Some(first_terms) = first.terms.as_deref() else {
        log::warn!("Invalid query item at index 0 for '{}'", query);
        return Some(MergeOutcome::Skipped {
            query: query.to_string(),
        });
    };

    let contributing: Vec<(&QueryItem, &[TermWeight])> = items
        .iter()
        .filter_map(|item| match item.terms.as_deref() {
            Some(terms) => Some((item, terms)),
            None => {
                log::warn!("Invalid query item for '{}'", query);
                None
            }
        })
        .collect();

    let total_frequency: u128 = contributing
        .iter()
        .map(|(item, _)| u128::from(item.frequency))
        .sum();

    if let Some(&(item, _)) = contributing
        .iter()
        .find(|(_, terms)| terms.len() != first_terms.len())
    {
        return Some(inconsistent(query, items, first, item));
    }

    let mut merged: Vec<TermWeight> = first_terms
        .iter()
        .map(|t| TermWeight::unweighted(t.term.clone()))
        .collect();

    for (position, result) in merged.iter_mut().enumerate() {
        for &(item, terms) in &contributing {
            let term = &terms[position];
            if term.term != result.term {
                return Some(inconsistent(query, items, first, item));
            }
            if total_frequency > 0 {
                result.weight += (item.frequency as f64 / total_frequency as f64) * term.weight;
            }
        }
    }

    Some(MergeOutcome::Merged(WeightedQuery {
        query: query.to_string(),
        total_frequency,
        terms: merged,
    }))
}

fn inconsistent(
    query: &str,
    items: &[QueryItem],
    first: &QueryItem,
    offending: &QueryItem,
) -> MergeOutcome {
    log::warn!(
        "Query with different clicked targets is inconsistent: '{}' [{}] vs '{}' [{}]",
        first.query,
        join_terms(first.terms()),
        offending.query,
        join_terms(offending.terms())
    );
    MergeOutcome::Inconsistent {
        query: query.to_string(),
        items: items.to_vec(),
    }
}

/// Merge every key of the group, in key order.
///
/// Keys are independent, so they are merged in parallel.
pub fn merge_all(group: &QueryGroup) -> Vec<MergeOutcome> {
    let entries: Vec<(&str, &[QueryItem])> = group.iter().collect();
    entries
        .par_iter()
        .filter_map(|&(query, items)| merge_query(query, items))
        .collect()
}

/// Terms of a sequence joined by single spaces.
pub fn join_terms(terms: &[TermWeight]) -> String {
    terms
        .iter()
        .map(|t| t.term.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(query: &str, frequency: u64, terms: &[(&str, f64)]) -> QueryItem {
        QueryItem {
            query: query.to_string(),
            frequency,
            terms: Some(terms.iter().map(|(t, w)| TermWeight::new(*t, *w)).collect()),
        }
    }

    #[test]
    fn test_single_item_passes_through() {
        let items = vec![weighted("car", 12, &[("car", 1.0)])];
        let outcome = merge_query("car", &items).unwrap();

        let MergeOutcome::Merged(merged) = outcome else {
            panic!("expected merged outcome");
        };
        assert_eq!(merged.total_frequency, 12);
        assert_eq!(merged.terms, vec![TermWeight::new("car", 1.0)]);
    }

    #[test]
    fn test_frequency_weighted_average() {
        let items = vec![
            weighted("red car", 1, &[("red", 0.2), ("car", 1.0)]),
            weighted("red car", 3, &[("red", 0.6), ("car", 0.8)]),
        ];
        let MergeOutcome::Merged(merged) = merge_query("redcar", &items).unwrap() else {
            panic!("expected merged outcome");
        };

        assert_eq!(merged.query, "redcar");
        assert_eq!(merged.total_frequency, 4);
        assert!((merged.weight_of("red").unwrap() - 0.5).abs() < 1e-9);
        assert!((merged.weight_of("car").unwrap() - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_term_disagreement_is_inconsistent() {
        let items = vec![
            weighted("redcar", 2, &[("red", 0.5), ("car", 1.0)]),
            weighted("red car", 3, &[("redcar", 1.0), ("x", 1.0)]),
        ];
        let outcome = merge_query("redcar", &items).unwrap();

        match outcome {
            MergeOutcome::Inconsistent { query, items } => {
                assert_eq!(query, "redcar");
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected inconsistent outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_length_disagreement_is_inconsistent() {
        let shorter_second = vec![
            weighted("ab", 2, &[("a", 0.5), ("b", 1.0)]),
            weighted("ab", 3, &[("a", 1.0)]),
        ];
        assert!(matches!(
            merge_query("ab", &shorter_second),
            Some(MergeOutcome::Inconsistent { .. })
        ));

        let longer_second = vec![
            weighted("ab", 2, &[("a", 1.0)]),
            weighted("ab", 3, &[("a", 1.0), ("b", 1.0)]),
        ];
        assert!(matches!(
            merge_query("ab", &longer_second),
            Some(MergeOutcome::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_invalid_first_item_is_skipped() {
        let items = vec![QueryItem::new("car", 3), weighted("car", 2, &[("car", 1.0)])];
        assert_eq!(
            merge_query("car", &items),
            Some(MergeOutcome::Skipped {
                query: "car".to_string()
            })
        );
        assert_eq!(merge_query("car", &[]), None);
    }

    #[test]
    fn test_total_frequency_beyond_u64() {
        let items = vec![
            weighted("car", u64::MAX, &[("car", 1.0)]),
            weighted("car", u64::MAX, &[("car", 0.5)]),
        ];
        let MergeOutcome::Merged(merged) = merge_query("car", &items).unwrap() else {
            panic!("expected merged outcome");
        };
        assert_eq!(merged.total_frequency, 2 * u128::from(u64::MAX));
        assert!((merged.weight_of("car").unwrap() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_later_items_do_not_count() {
        let items = vec![weighted("car", 2, &[("car", 1.0)]), QueryItem::new("car", 8)];
        let MergeOutcome::Merged(merged) = merge_query("car", &items).unwrap() else {
            panic!("expected merged outcome");
        };
        assert_eq!(merged.total_frequency, 2);
        assert!((merged.weight_of("car").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_all_preserves_key_order() {
        let mut group = QueryGroup::new();
        group.add(weighted("zoo", 2, &[("zoo", 1.0)]));
        group.add(weighted("apple", 2, &[("apple", 1.0)]));
        group.add(weighted("moon", 2, &[("moon", 1.0)]));

        let outcomes = merge_all(&group);
        let keys: Vec<_> = outcomes.iter().map(|o| o.query()).collect();
        assert_eq!(keys, vec!["apple", "moon", "zoo"]);
    }
}
