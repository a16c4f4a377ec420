//! Term weighting inside one click cluster.
//!
//! Two queries are related when the term set of one contains the term set of
//! the other, in either direction and regardless of order. For every anchor
//! query, each related query adds its frequency to the anchor terms it shares
//! with the anchor:
//!
//! - a related query that is a subset of the anchor credits only the anchor
//!   terms it contains;
//! - a related query that is a superset of the anchor credits every anchor term.
//!
//! A term's weight is its credited frequency divided by the anchor's frequency
//! plus the frequencies of all related queries. Terms kept by every paraphrase
//! end up with weight 1, optional terms with less.
//!
//! Estimation is pure: the caller decides whether to keep the results based on
//! [`ClusterEstimate::entire_cluster`].

use crate::weight::types::{QueryItem, TermWeight};

/// An anchor query must be at least this many characters long to satisfy the
/// entire-cluster condition.
pub const MIN_ENTIRE_CLUSTER_QUERY_CHARS: usize = 2;

/// Result of estimating one cluster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterEstimate {
    /// Anchors that had enough related queries, with weights attached.
    pub items: Vec<QueryItem>,
    /// Whether some anchor is related to every other query in the cluster.
    pub entire_cluster: bool,
}

impl ClusterEstimate {
    /// Whether the cluster's items should be kept.
    pub fn accepted(&self) -> bool {
        self.entire_cluster
    }
}

/// Positions of `anchor` terms credited by `other`, or `None` when the two
/// queries are unrelated.
///
/// When `other` is contained in `anchor` the credited positions are the anchor
/// terms matched by `other`'s terms, in `other`'s order. When `anchor` is
/// contained in `other` every anchor position is credited.
pub fn related_positions(anchor: &[TermWeight], other: &[TermWeight]) -> Option<Vec<usize>> {
    let matched: Option<Vec<usize>> = other
        .iter()
        .map(|o| anchor.iter().position(|a| a.term == o.term))
        .collect();
    if matched.is_some() {
        return matched;
    }

    let anchor_in_other = anchor
        .iter()
        .all(|a| other.iter().any(|o| o.term == a.term));
    anchor_in_other.then(|| (0..anchor.len()).collect())
}

/// Whether either query's term set contains the other's.
pub fn is_related(a: &[TermWeight], b: &[TermWeight]) -> bool {
    related_positions(a, b).is_some()
}

/// Weights terms of the queries in a cluster.
#[derive(Debug, Clone)]
pub struct TermWeightEstimator {
    min_cluster_size: usize,
}

impl TermWeightEstimator {
    /// `min_cluster_size` is the number of related queries an anchor needs.
    pub fn new(min_cluster_size: usize) -> Self {
        TermWeightEstimator { min_cluster_size }
    }

    pub fn min_cluster_size(&self) -> usize {
        self.min_cluster_size
    }

    /// Estimate term weights for every anchor in the cluster.
    ///
    /// Items without terms are ignored and do not count towards the cluster size.
    pub fn estimate(&self, cluster: &[QueryItem]) -> ClusterEstimate {
        let valid: Vec<(&QueryItem, &[TermWeight])> = cluster
            .iter()
            .filter_map(|item| item.terms.as_deref().map(|terms| (item, terms)))
            .collect();

        let mut estimate = ClusterEstimate::default();
        for (i, &(anchor, anchor_terms)) in valid.iter().enumerate() {
            // Sums of u64 frequencies cannot overflow u128.
            let anchor_frequency = u128::from(anchor.frequency);
            let mut credited: Vec<u128> = vec![anchor_frequency; anchor_terms.len()];
            let mut total_frequency = anchor_frequency;
            let mut related = 0usize;

            for (j, &(other, other_terms)) in valid.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(positions) = related_positions(anchor_terms, other_terms) {
                    let frequency = u128::from(other.frequency);
                    related += 1;
                    total_frequency += frequency;
                    for p in positions {
                        credited[p] += frequency;
                    }
                }
            }

            if related < self.min_cluster_size {
                continue;
            }

            if related + 1 == valid.len()
                && anchor.query.chars().count() >= MIN_ENTIRE_CLUSTER_QUERY_CHARS
            {
                estimate.entire_cluster = true;
            }

            let terms = anchor_terms
                .iter()
                .zip(credited)
                .map(|(term, freq)| {
                    let weight = if total_frequency == 0 {
                        0.0
                    } else {
                        freq as f64 / total_frequency as f64
                    };
                    TermWeight::new(term.term.clone(), weight)
                })
                .collect();

            estimate.items.push(QueryItem {
                query: anchor.query.clone(),
                frequency: anchor.frequency,
                terms: Some(terms),
            });
        }

        estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(query: &str, frequency: u64) -> QueryItem {
        QueryItem::with_terms(query, frequency, query.split_whitespace())
    }

    fn terms(words: &[&str]) -> Vec<TermWeight> {
        words.iter().map(|w| TermWeight::unweighted(*w)).collect()
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("term present");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_related_positions_subset_of_anchor() {
        let anchor = terms(&["red", "car", "blue"]);
        let other = terms(&["blue", "red"]);
        assert_eq!(related_positions(&anchor, &other), Some(vec![2, 0]));
    }

    #[test]
    fn test_related_positions_anchor_subset_of_other() {
        let anchor = terms(&["car"]);
        let other = terms(&["red", "car"]);
        assert_eq!(related_positions(&anchor, &other), Some(vec![0]));
    }

    #[test]
    fn test_related_positions_unrelated() {
        let a = terms(&["red", "car"]);
        let b = terms(&["blue", "car"]);
        assert_eq!(related_positions(&a, &b), None);
        assert!(!is_related(&a, &b));
        assert!(!is_related(&b, &a));
    }

    #[test]
    fn test_relation_is_symmetric_and_order_insensitive() {
        let a = terms(&["car", "red"]);
        let b = terms(&["red", "car", "blue"]);
        assert!(is_related(&a, &b));
        assert!(is_related(&b, &a));
    }

    #[test]
    fn test_three_query_scenario() {
        let cluster = vec![item("red car", 3), item("car", 5), item("red car blue", 4)];
        let estimate = TermWeightEstimator::new(2).estimate(&cluster);

        assert!(estimate.entire_cluster);
        assert!(estimate.accepted());
        assert_eq!(estimate.items.len(), 3);

        let car = estimate.items.iter().find(|i| i.query == "car").unwrap();
        assert_close(car.weight_of("car"), 1.0);

        // "red car": itself 3, "car" credits only "car", "red car blue" credits both.
        let red_car = estimate.items.iter().find(|i| i.query == "red car").unwrap();
        assert_close(red_car.weight_of("car"), 1.0);
        assert_close(red_car.weight_of("red"), 7.0 / 12.0);

        // "red car blue": "red car" credits red and car, "car" credits car.
        let longest = &estimate.items[2];
        assert_eq!(longest.query, "red car blue");
        assert_close(longest.weight_of("car"), 1.0);
        assert_close(longest.weight_of("red"), 7.0 / 12.0);
        assert_close(longest.weight_of("blue"), 4.0 / 12.0);
    }

    #[test]
    fn test_unrelated_queries_yield_nothing() {
        let cluster = vec![item("apple", 5), item("banana", 7)];
        let estimate = TermWeightEstimator::new(2).estimate(&cluster);

        assert!(!estimate.entire_cluster);
        assert!(estimate.items.is_empty());
    }

    #[test]
    fn test_fragmented_cluster_is_not_accepted() {
        // No anchor is related to all three other queries.
        let cluster = vec![
            item("red car", 3),
            item("car", 3),
            item("car wash", 3),
            item("wash", 3),
        ];
        let estimate = TermWeightEstimator::new(1).estimate(&cluster);

        assert!(!estimate.items.is_empty());
        assert!(!estimate.entire_cluster);
        assert!(!estimate.accepted());
    }

    #[test]
    fn test_min_cluster_size_discards_anchor() {
        let cluster = vec![item("car", 5), item("red car", 3)];
        let estimate = TermWeightEstimator::new(2).estimate(&cluster);
        assert!(estimate.items.is_empty());
        assert!(!estimate.entire_cluster);

        let estimate = TermWeightEstimator::new(1).estimate(&cluster);
        assert_eq!(estimate.items.len(), 2);
        assert!(estimate.entire_cluster);
    }

    #[test]
    fn test_short_anchor_does_not_open_the_gate() {
        // Only "x" is related to every other query, and it is one character long.
        let cluster = vec![
            QueryItem::with_terms("x", 3, ["x"]),
            QueryItem::with_terms("xy", 3, ["x", "y"]),
            QueryItem::with_terms("xz", 3, ["x", "z"]),
        ];
        let estimate = TermWeightEstimator::new(1).estimate(&cluster);
        assert_eq!(estimate.items.len(), 3);
        assert!(!estimate.entire_cluster);

        // In a pair, "xy" covers the cluster and is long enough.
        let estimate = TermWeightEstimator::new(1).estimate(&cluster[..2]);
        assert!(estimate.entire_cluster);

        let single_char_only = vec![
            QueryItem::with_terms("x", 3, ["x"]),
            QueryItem::with_terms("y", 3, ["x"]),
        ];
        let estimate = TermWeightEstimator::new(1).estimate(&single_char_only);
        assert_eq!(estimate.items.len(), 2);
        assert!(!estimate.entire_cluster);
    }

    #[test]
    fn test_invalid_items_are_ignored() {
        let cluster = vec![item("car", 5), QueryItem::new("car car", 9), item("red car", 3)];
        let estimate = TermWeightEstimator::new(1).estimate(&cluster);

        assert!(estimate.entire_cluster);
        assert_eq!(estimate.items.len(), 2);
        assert!(estimate.items.iter().all(|i| i.query != "car car"));
    }

    #[test]
    fn test_huge_frequencies_do_not_overflow() {
        let cluster = vec![item("car", u64::MAX), item("red car", 2)];
        let estimate = TermWeightEstimator::new(1).estimate(&cluster);

        assert!(estimate.entire_cluster);
        let car = estimate.items.iter().find(|i| i.query == "car").unwrap();
        assert_close(car.weight_of("car"), 1.0);
        let red_car = estimate.items.iter().find(|i| i.query == "red car").unwrap();
        assert_close(red_car.weight_of("car"), 1.0);
        assert!(red_car.weight_of("red").unwrap() < 1e-9);
    }

    #[test]
    fn test_full_attribution_sums_to_total() {
        // Supersets credit every anchor term, so each weight is 1.
        let cluster = vec![item("car", 2), item("car red", 3), item("car blue", 4)];
        let estimate = TermWeightEstimator::new(2).estimate(&cluster);
        let car = estimate.items.iter().find(|i| i.query == "car").unwrap();
        assert_close(car.weight_of("car"), 1.0);
    }
}
