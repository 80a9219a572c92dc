//! Word list loading.
//!
//! A word list is a text file with one word per line. Blank lines are
//! skipped, words are lower-cased, and duplicates keep their first position
//! so iteration order is the file order.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::word::Word;

/// An immutable, ordered, de-duplicated collection of words.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
    index: HashSet<Word>,
}

impl WordList {
    /// Read a list from disk. Fails on unreadable files, malformed lines and
    /// lists with no words at all.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut words = Vec::new();
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let word = line.parse::<Word>().map_err(|source| Error::InvalidWord {
                path: path.to_path_buf(),
                line: n + 1,
                source,
            })?;
            words.push(word);
        }

        let list = Self::from_words(words);
        if list.is_empty() {
            return Err(Error::EmptyWordList {
                path: path.to_path_buf(),
            });
        }
        info!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let mut list = Self::default();
        for word in words {
            if list.index.insert(word) {
                list.words.push(word);
            }
        }
        list
    }

    /// Parse every string as a word; convenient for fixtures.
    pub fn parse<'a>(words: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let words = words
            .into_iter()
            .map(|s| s.parse::<Word>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::from_words(words))
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }
}
