//! End-to-end weighting run.
//!
//! The run has two phases. Accumulation streams the records once, clusters
//! them, estimates each cluster and appends accepted items to a
//! [`QueryGroup`]. The merge phase then reconciles every key of the group and
//! writes output lines and inconsistency diagnostics.

use std::io::{BufRead, Write};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::Tokenizer;
use crate::config::StatConfig;
use crate::error::Result;
use crate::record::{Record, RecordReader};
use crate::weight::adapter::QueryTokenizer;
use crate::weight::estimator::TermWeightEstimator;
use crate::weight::group::QueryGroup;
use crate::weight::grouper::ClusterGrouper;
use crate::weight::merger::{MergeOutcome, merge_all};
use crate::weight::output::{write_inconsistency, write_weighted_query};

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Input lines read
    pub lines_read: u64,
    /// Lines skipped as malformed
    pub malformed_records: u64,
    /// Records at or above the pair-frequency threshold
    pub records_retained: u64,
    /// Clusters with at least two records
    pub clusters_formed: u64,
    /// Clusters whose items were kept
    pub clusters_accepted: u64,
    /// Clusters discarded by the entire-cluster condition
    pub clusters_rejected: u64,
    /// Queries dropped for repeated terms
    pub duplicate_term_queries: u64,
    /// Distinct normalized query texts accumulated
    pub distinct_queries: u64,
    /// Output lines written
    pub queries_written: u64,
    /// Queries rejected for inconsistent segmentation
    pub queries_inconsistent: u64,
    /// Queries skipped for lacking terms
    pub queries_skipped: u64,
}

/// Drives grouping, estimation, accumulation and merging.
#[derive(Debug)]
pub struct TermWeightPipeline {
    config: StatConfig,
    tokenizer: QueryTokenizer,
    estimator: TermWeightEstimator,
}

impl TermWeightPipeline {
    pub fn new(config: StatConfig, tokenizer: Arc<dyn Tokenizer>) -> Self {
        let estimator = TermWeightEstimator::new(config.min_cluster_size);
        TermWeightPipeline {
            config,
            tokenizer: QueryTokenizer::new(tokenizer),
            estimator,
        }
    }

    pub fn config(&self) -> &StatConfig {
        &self.config
    }

    /// Run both phases over `input`.
    ///
    /// Merged queries go to `output`, diagnostic blocks for inconsistent
    /// queries go to `diagnostics`.
    pub fn run<R, W, L>(&self, input: R, output: &mut W, diagnostics: &mut L) -> Result<PipelineStats>
    where
        R: BufRead,
        W: Write,
        L: Write,
    {
        let mut stats = PipelineStats::default();
        let mut group = QueryGroup::new();

        self.accumulate(input, &mut group, &mut stats)?;

        log::info!("Merging clusters...");
        self.write_merged(&group, output, diagnostics, &mut stats)?;
        output.flush()?;
        diagnostics.flush()?;

        Ok(stats)
    }

    /// Stream records into `group`.
    pub fn accumulate<R: BufRead>(
        &self,
        input: R,
        group: &mut QueryGroup,
        stats: &mut PipelineStats,
    ) -> Result<()> {
        let mut grouper = ClusterGrouper::new(self.config.min_pair_frequency);
        let mut records = RecordReader::new(input);
        let mut well_formed: u64 = 0;

        for result in records.by_ref() {
            let record = match result {
                Ok(record) => record,
                Err(e) if !e.is_fatal() => {
                    log::warn!("Invalid line skipped: {}", e);
                    stats.malformed_records += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            well_formed += 1;
            if self.config.progress_interval > 0 && well_formed % self.config.progress_interval == 0 {
                log::info!("{} query-target pairs processed", well_formed);
            }

            if let Some(cluster) = grouper.push(record) {
                self.process_cluster(cluster, group, stats)?;
            }
        }
        if let Some(cluster) = grouper.finish() {
            self.process_cluster(cluster, group, stats)?;
        }

        stats.lines_read = records.line_number();
        stats.records_retained = grouper.retained();
        stats.distinct_queries = group.len() as u64;
        Ok(())
    }

    /// Segment and estimate one cluster, appending its items when accepted.
    ///
    /// Returns whether the cluster was accepted.
    pub fn process_cluster(
        &self,
        cluster: Vec<Record>,
        group: &mut QueryGroup,
        stats: &mut PipelineStats,
    ) -> Result<bool> {
        stats.clusters_formed += 1;
        let target = cluster.first().map(|r| r.target.clone()).unwrap_or_default();

        let (items, rejected) = self.tokenizer.tokenize_cluster(cluster)?;
        stats.duplicate_term_queries += rejected as u64;

        let estimate = self.estimator.estimate(&items);
        if estimate.accepted() {
            log::debug!(
                "Cluster '{}' accepted with {} weighted queries",
                target,
                estimate.items.len()
            );
            stats.clusters_accepted += 1;
            group.add_cluster(estimate.items);
            Ok(true)
        } else {
            log::debug!("Cluster '{}' rejected", target);
            stats.clusters_rejected += 1;
            Ok(false)
        }
    }

    /// Merge every accumulated query and write the results.
    pub fn write_merged<W: Write, L: Write>(
        &self,
        group: &QueryGroup,
        output: &mut W,
        diagnostics: &mut L,
        stats: &mut PipelineStats,
    ) -> Result<()> {
        for outcome in merge_all(group) {
            match outcome {
                MergeOutcome::Merged(merged) => {
                    write_weighted_query(output, &merged)?;
                    stats.queries_written += 1;
                }
                MergeOutcome::Inconsistent { items, .. } => {
                    write_inconsistency(diagnostics, &items)?;
                    stats.queries_inconsistent += 1;
                }
                MergeOutcome::Skipped { .. } => {
                    stats.queries_skipped += 1;
                }
            }
        }
        Ok(())
    }
}
