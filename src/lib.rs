//! # termweight
//!
//! Derives a per-term importance weight for search queries from click logs.
//!
//! Many textual variants of the same information need click through to the
//! same destination. Queries sharing a click target are clustered, queries
//! whose term sets contain one another are treated as paraphrases, and each
//! term is weighted by how much of the cluster's click frequency keeps it.
//! Estimates for the same query text from different targets are merged into
//! one weight vector.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use termweight::analysis::tokenizer::WhitespaceTokenizer;
//! use termweight::config::StatConfig;
//! use termweight::weight::TermWeightPipeline;
//!
//! let input = "red car\tu1\t3\ncar\tu1\t5\nred car blue\tu1\t4\n";
//! let pipeline = TermWeightPipeline::new(
//!     StatConfig::new(2, 2),
//!     Arc::new(WhitespaceTokenizer::new()),
//! );
//!
//! let mut output = Vec::new();
//! let mut diagnostics = Vec::new();
//! pipeline.run(input.as_bytes(), &mut output, &mut diagnostics).unwrap();
//!
//! let output = String::from_utf8(output).unwrap();
//! assert!(output.starts_with("car\t12\tcar[1]\n"));
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod record;
pub mod weight;

pub mod prelude {
    pub use crate::analysis::tokenizer::Tokenizer;
    pub use crate::config::StatConfig;
    pub use crate::error::{Result, TermWeightError};
    pub use crate::record::Record;
    pub use crate::weight::{QueryItem, TermWeight, TermWeightPipeline, WeightedQuery};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
