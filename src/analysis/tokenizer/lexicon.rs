//! Dictionary segmenter using forward maximum matching.
//!
//! Text is first split on whitespace. Inside each chunk the longest lexicon
//! entry starting at the current character wins. Where no entry matches, a
//! run of ASCII alphanumerics is kept together and anything else is emitted
//! one character at a time.

use std::path::Path;
use std::sync::Arc;

use crate::analysis::lexicon::Lexicon;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::whitespace::whitespace_chunks;
use crate::error::Result;

/// Segmenter backed by a [`Lexicon`].
///
/// # Examples
///
/// ```
/// use termweight::analysis::Lexicon;
/// use termweight::analysis::tokenizer::{LexiconTokenizer, Tokenizer};
///
/// let lexicon: Lexicon = ["北京", "天气"].into_iter().collect();
/// let tokenizer = LexiconTokenizer::new(lexicon);
/// let terms: Vec<_> = tokenizer
///     .tokenize("北京天气")
///     .unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(terms, vec!["北京", "天气"]);
/// ```
#[derive(Clone, Debug)]
pub struct LexiconTokenizer {
    lexicon: Arc<Lexicon>,
}

impl LexiconTokenizer {
    /// Create a segmenter over the given lexicon.
    pub fn new(lexicon: Lexicon) -> Self {
        LexiconTokenizer {
            lexicon: Arc::new(lexicon),
        }
    }

    /// Load the lexical resource at `path` and build a segmenter over it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let lexicon = Lexicon::load_from_file(path)?;
        log::info!("Loaded lexicon with {} entries", lexicon.len());
        Ok(Self::new(lexicon))
    }

    /// The underlying lexicon.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Segment one whitespace-free chunk starting at byte `base`.
    fn segment_chunk(&self, chunk: &str, base: usize, tokens: &mut Vec<Token>) {
        let boundaries: Vec<usize> = chunk
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(chunk.len()))
            .collect();
        let char_count = boundaries.len() - 1;
        let max_len = self.lexicon.max_word_chars();

        let mut i = 0;
        while i < char_count {
            let longest = max_len.min(char_count - i);
            let matched = (1..=longest)
                .rev()
                .find(|&len| self.lexicon.contains(&chunk[boundaries[i]..boundaries[i + len]]));

            let (len, token_type) = match matched {
                Some(len) => (len, Some(TokenType::Lexicon)),
                None => {
                    let run = chunk[boundaries[i]..]
                        .chars()
                        .take_while(|c| c.is_ascii_alphanumeric())
                        .count();
                    (run.max(1), None)
                }
            };

            let start = boundaries[i];
            let end = boundaries[i + len];
            let word = &chunk[start..end];
            let token_type = token_type.unwrap_or_else(|| TokenType::detect(word));
            tokens.push(
                Token::with_offsets(word, tokens.len(), base + start, base + end)
                    .with_token_type(token_type),
            );
            i += len;
        }
    }
}

impl Tokenizer for LexiconTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        for (start, chunk) in whitespace_chunks(text) {
            self.segment_chunk(chunk, start, &mut tokens);
        }
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
