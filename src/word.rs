//! Fixed-length word values.
//!
//! Words are stored as lower-case ASCII bytes so the feedback encoder can
//! index letter counts directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::WORD_LENGTH;

/// Why a string was rejected as a word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("expected 5 letters, got {0}")]
    Length(usize),
    #[error("'{0}' is not a letter")]
    NotALetter(char),
}

/// A five-letter word, normalized to lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Build a word from already-normalized bytes.
    ///
    /// Returns `None` unless every byte is in `a..=z`.
    pub fn from_bytes(bytes: [u8; WORD_LENGTH]) -> Option<Self> {
        if bytes.iter().all(u8::is_ascii_lowercase) {
            Some(Self(bytes))
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only a..=z is ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Whether the letter occurs anywhere in the word.
    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter.to_ascii_lowercase())
    }

    pub fn to_uppercase(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let count = s.chars().count();
        if count != WORD_LENGTH {
            return Err(WordError::Length(count));
        }
        let mut bytes = [0u8; WORD_LENGTH];
        for (slot, c) in bytes.iter_mut().zip(s.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::NotALetter(c));
            }
            *slot = c.to_ascii_lowercase() as u8;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
