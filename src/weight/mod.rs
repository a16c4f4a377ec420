//! Click-cluster term weighting.
//!
//! Records sharing a click target are grouped into clusters. Inside a cluster,
//! queries whose term sets contain one another are treated as paraphrases of
//! the same intent, and each term of an anchor query is weighted by the click
//! frequency of the paraphrases that kept it. Weights observed for the same
//! query text under different targets are merged at the end of the run.
//!
//! The stages, in pipeline order:
//!
//! - [`grouper::ClusterGrouper`] - splits the sorted record stream into clusters
//! - [`adapter::QueryTokenizer`] - segments queries, rejecting repeated terms
//! - [`estimator::TermWeightEstimator`] - weights terms inside one cluster
//! - [`group::QueryGroup`] - accumulates accepted items by normalized text
//! - [`merger`] - reconciles the estimates for each normalized text
//! - [`pipeline::TermWeightPipeline`] - drives all of the above over a stream

pub mod adapter;
pub mod estimator;
pub mod group;
pub mod grouper;
pub mod merger;
pub mod output;
pub mod pipeline;
pub mod types;

pub use adapter::QueryTokenizer;
pub use estimator::{ClusterEstimate, TermWeightEstimator};
pub use group::{QueryGroup, normalize_query};
pub use grouper::ClusterGrouper;
pub use merger::{MergeOutcome, merge_all, merge_query};
pub use pipeline::{PipelineStats, TermWeightPipeline};
pub use types::{QueryItem, TermWeight, WeightedQuery};
