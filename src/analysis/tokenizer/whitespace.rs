//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = whitespace_chunks(text)
            .enumerate()
            .map(|(position, (start, word))| {
                Token::with_offsets(word, position, start, start + word.len())
                    .with_token_type(TokenType::detect(word))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Split text on whitespace, yielding each chunk with its byte offset.
pub(crate) fn whitespace_chunks(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest_start = 0;
    std::iter::from_fn(move || {
        let rest = &text[rest_start..];
        let skip = rest.len() - rest.trim_start().len();
        let start = rest_start + skip;
        if start >= text.len() {
            return None;
        }
        let chunk = &text[start..];
        let end = chunk
            .find(char::is_whitespace)
            .map(|offset| start + offset)
            .unwrap_or(text.len());
        rest_start = end;
        Some((start, &text[start..end]))
    })
}
