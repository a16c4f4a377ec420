//! Text analysis for query segmentation.
//!
//! The weighting core treats segmentation as a black box: it only needs an
//! ordered sequence of terms for a query string. This module provides the
//! [`tokenizer::Tokenizer`] seam and the segmenters shipped with the binary.

pub mod lexicon;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use lexicon::Lexicon;
pub use token::*;
pub use tokenizer::*;
