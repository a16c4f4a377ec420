//! Segmenter implementations.
//!
//! # Available Tokenizers
//!
//! - [`lexicon::LexiconTokenizer`] - Forward maximum matching against a word list
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//!
//! # Examples
//!
//! ```
//! use termweight::analysis::tokenizer::Tokenizer;
//! use termweight::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("red car").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for segmenters that split query text into ordered terms.
///
/// The trait requires `Send + Sync` so one segmenter can be shared by the
/// whole run.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens, in emission order.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lexicon;
pub mod unicode_word;
pub mod whitespace;

pub use lexicon::LexiconTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;
