//! Configuration for a term weighting run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Thresholds and resources consumed by the weighting pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatConfig {
    /// Records whose (query, target) frequency is below this value are dropped
    /// before grouping.
    pub min_pair_frequency: u64,

    /// Minimum number of related queries an anchor needs to keep its weights.
    pub min_cluster_size: usize,

    /// Lexical resource used by the dictionary segmenter.
    pub lexicon_path: Option<PathBuf>,

    /// Emit a progress line every this many records. Zero disables progress.
    pub progress_interval: u64,
}

impl Default for StatConfig {
    fn default() -> Self {
        Self {
            min_pair_frequency: 2,
            min_cluster_size: 2,
            lexicon_path: None,
            progress_interval: 100_000,
        }
    }
}

impl StatConfig {
    /// Create a configuration with the given thresholds.
    pub fn new(min_pair_frequency: u64, min_cluster_size: usize) -> Self {
        Self {
            min_pair_frequency,
            min_cluster_size,
            ..Default::default()
        }
    }

    /// Set the lexical resource path.
    pub fn with_lexicon_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.lexicon_path = Some(path.into());
        self
    }

    /// Set the progress reporting interval.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }
}
