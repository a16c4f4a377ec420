//! Splits a target-sorted record stream into clusters.
//!
//! A cluster is a maximal run of retained records sharing one target. Records
//! below the pair-frequency threshold are dropped before grouping, so they can
//! neither start nor extend a run.

use crate::record::Record;

/// Incremental cluster builder.
///
/// # Examples
///
/// ```
/// use termweight::record::Record;
/// use termweight::weight::ClusterGrouper;
///
/// let mut grouper = ClusterGrouper::new(2);
/// assert!(grouper.push(Record::new("car", "u1", 5)).is_none());
/// assert!(grouper.push(Record::new("red car", "u1", 3)).is_none());
/// let cluster = grouper.push(Record::new("sky", "u2", 4)).unwrap();
/// assert_eq!(cluster.len(), 2);
/// assert!(grouper.finish().is_none());
/// ```
#[derive(Debug)]
pub struct ClusterGrouper {
    min_pair_frequency: u64,
    current: Vec<Record>,
    last_target: Option<String>,
    retained: u64,
    discarded: u64,
}

impl ClusterGrouper {
    pub fn new(min_pair_frequency: u64) -> Self {
        ClusterGrouper {
            min_pair_frequency,
            current: Vec::new(),
            last_target: None,
            retained: 0,
            discarded: 0,
        }
    }

    /// Feed the next record.
    ///
    /// Returns the cluster closed by this record, if the record changed the
    /// target and the closed run had at least two members.
    pub fn push(&mut self, record: Record) -> Option<Vec<Record>> {
        if record.frequency < self.min_pair_frequency {
            return None;
        }
        self.retained += 1;

        let mut closed = None;
        if self.last_target.as_deref() != Some(record.target.as_str()) {
            if self.last_target.is_some() {
                closed = self.close();
            }
            self.last_target = Some(record.target.clone());
        }
        self.current.push(record);
        closed
    }

    /// Flush the last run at end of input.
    pub fn finish(&mut self) -> Option<Vec<Record>> {
        self.last_target = None;
        self.close()
    }

    /// Records that passed the frequency threshold so far.
    pub fn retained(&self) -> u64 {
        self.retained
    }

    /// Runs dropped for having fewer than two members.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    fn close(&mut self) -> Option<Vec<Record>> {
        let cluster = std::mem::take(&mut self.current);
        match cluster.len() {
            0 => None,
            1 => {
                self.discarded += 1;
                None
            }
            _ => Some(cluster),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(grouper: &mut ClusterGrouper, records: Vec<Record>) -> Vec<Vec<Record>> {
        let mut clusters: Vec<Vec<Record>> =
            records.into_iter().filter_map(|r| grouper.push(r)).collect();
        clusters.extend(grouper.finish());
        clusters
    }

    #[test]
    fn test_groups_adjacent_targets() {
        let mut grouper = ClusterGrouper::new(1);
        let clusters = drain(
            &mut grouper,
            vec![
                Record::new("a", "u1", 3),
                Record::new("b", "u1", 3),
                Record::new("c", "u2", 3),
                Record::new("d", "u2", 3),
                Record::new("e", "u2", 3),
            ],
        );

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len(), 2);
        assert_eq!(clusters[1].len(), 3);
        assert_eq!(clusters[1][0].query, "c");
    }

    #[test]
    fn test_low_frequency_records_never_split_or_extend() {
        let mut grouper = ClusterGrouper::new(2);
        let clusters = drain(
            &mut grouper,
            vec![
                Record::new("a", "u1", 3),
                Record::new("x", "u9", 1),
                Record::new("b", "u1", 2),
                Record::new("c", "u2", 1),
            ],
        );

        assert_eq!(clusters.len(), 1);
        let queries: Vec<_> = clusters[0].iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["a", "b"]);
        assert_eq!(grouper.retained(), 2);
    }

    #[test]
    fn test_singletons_are_discarded() {
        let mut grouper = ClusterGrouper::new(1);
        let clusters = drain(
            &mut grouper,
            vec![
                Record::new("a", "u1", 3),
                Record::new("b", "u2", 3),
                Record::new("c", "u3", 3),
            ],
        );

        assert!(clusters.is_empty());
        assert_eq!(grouper.discarded(), 3);
    }

    #[test]
    fn test_non_adjacent_runs_are_separate_clusters() {
        let mut grouper = ClusterGrouper::new(1);
        let clusters = drain(
            &mut grouper,
            vec![
                Record::new("a", "u1", 3),
                Record::new("b", "u1", 3),
                Record::new("c", "u2", 3),
                Record::new("d", "u2", 3),
                Record::new("e", "u1", 3),
                Record::new("f", "u1", 3),
            ],
        );

        assert_eq!(clusters.len(), 3);
    }

    #[test]
    fn test_empty_stream() {
        let mut grouper = ClusterGrouper::new(2);
        assert!(grouper.finish().is_none());
    }
}
