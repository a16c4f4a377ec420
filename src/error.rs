//! Error types for the termweight library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TermWeightError`] enum.
//!
//! # Examples
//!
//! ```
//! use termweight::error::{Result, TermWeightError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TermWeightError::parse("expected 3 fields"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for termweight operations.
#[derive(Error, Debug)]
pub enum TermWeightError {
    /// I/O errors (opening inputs, writing output or the diagnostic log)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (segmenter resources, tokenization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Malformed input records
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with TermWeightError.
pub type Result<T> = std::result::Result<T, TermWeightError>;

impl TermWeightError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TermWeightError::Analysis(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        TermWeightError::Parse(msg.into())
    }

    /// Whether this error aborts a run.
    ///
    /// Malformed records are skipped by the pipeline; everything else is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TermWeightError::Parse(_))
    }
}
