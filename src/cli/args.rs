//! Command line argument parsing for the termweight CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::StatConfig;

/// termweight - derive per-term weights for search queries from click logs
#[derive(Parser, Debug, Clone)]
#[command(name = "termweight")]
#[command(about = "Derive per-term importance weights for queries from click logs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TermWeightArgs {
    /// Input file of `query \t target \t frequency` lines, sorted by target
    #[arg(value_name = "QUERY_TARGET_FREQ_FILE")]
    pub input: PathBuf,

    /// Output file of `query \t frequency \t term[weight] ...` lines
    #[arg(value_name = "QUERY_TERM_WEIGHT_FILE")]
    pub output: PathBuf,

    /// Minimum frequency of a (query, target) pair
    #[arg(value_name = "MIN_PAIR_FREQUENCY")]
    pub min_pair_frequency: u64,

    /// Minimum number of related queries an anchor query needs
    #[arg(value_name = "MIN_CLUSTER_SIZE")]
    pub min_cluster_size: usize,

    /// Lexical dictionary used by the segmenter
    #[arg(value_name = "LEXICON_FILE")]
    pub lexicon: PathBuf,

    /// Segmenter used to split queries into terms
    #[arg(short, long, default_value = "lexicon")]
    pub segmenter: SegmenterKind,

    /// File receiving diagnostics for queries segmented inconsistently
    #[arg(long, value_name = "LOG_FILE", default_value = "log.txt")]
    pub inconsistency_log: PathBuf,

    /// Report progress every N records (0 disables progress reporting)
    #[arg(long, default_value = "100000")]
    pub progress_interval: u64,

    /// Verbosity level (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Format of the run summary
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl TermWeightArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Build the run configuration from the arguments.
    pub fn stat_config(&self) -> StatConfig {
        StatConfig::new(self.min_pair_frequency, self.min_cluster_size)
            .with_lexicon_path(&self.lexicon)
            .with_progress_interval(self.progress_interval)
    }
}

/// Available segmenters
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmenterKind {
    /// Forward maximum matching against the lexicon file
    Lexicon,
    /// Split on whitespace only
    Whitespace,
    /// Unicode word boundaries
    UnicodeWord,
}

/// Output formats for the run summary
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
