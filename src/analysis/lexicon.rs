//! Word list backing the dictionary segmenter.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashSet;

use crate::error::{Result, TermWeightError};

/// A set of known words, with the length of the longest one in characters.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: AHashSet<String>,
    max_word_chars: usize,
}

impl Lexicon {
    /// Create a new empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word. Words are stored lowercased.
    pub fn add_word(&mut self, word: &str) {
        let normalized = word.trim().to_lowercase();
        if normalized.is_empty() {
            return;
        }
        self.max_word_chars = self.max_word_chars.max(normalized.chars().count());
        self.words.insert(normalized);
    }

    /// Check if a word exists in the lexicon.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Length of the longest entry, in characters.
    pub fn max_word_chars(&self) -> usize {
        self.max_word_chars
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Load a lexicon from a reader with one entry per line.
    ///
    /// The first whitespace-separated field of a line is the word; trailing
    /// columns are ignored. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lexicon = Lexicon::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(word) = line.split_whitespace().next() {
                lexicon.add_word(word);
            }
        }
        Ok(lexicon)
    }

    /// Load a lexicon from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TermWeightError::analysis(format!(
                "Failed to open lexicon {}: {}",
                path.display(),
                e
            ))
        })?;
        let lexicon = Self::from_reader(BufReader::new(file))?;
        if lexicon.is_empty() {
            log::warn!("Lexicon {} has no entries", path.display());
        }
        Ok(lexicon)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut lexicon = Lexicon::new();
        for word in iter {
            lexicon.add_word(word.as_ref());
        }
        lexicon
    }
}
