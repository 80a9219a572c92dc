//! Feedback calculation for Wordle guesses.
//!
//! This module computes the feedback pattern (green/yellow/gray) a guess
//! would receive against a target word, and parses patterns reported by a
//! player.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::word::Word;
use crate::WORD_LENGTH;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Correct,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word (gray)
    Absent,
}

impl Feedback {
    /// Wire symbol: `G`, `Y` or `B`.
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => 'G',
            Feedback::Present => 'Y',
            Feedback::Absent => 'B',
        }
    }

    pub fn to_emoji(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black/gray)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Correct),
            'y' | '1' => Some(Feedback::Present),
            'b' | 'x' | '0' => Some(Feedback::Absent),
            _ => None,
        }
    }

    fn digit(self) -> u8 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }
}

/// Why a reported pattern could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("expected 5 feedback symbols, got {0}")]
    Length(usize),
    #[error("unknown feedback symbol '{0}' (use G, Y or B)")]
    Symbol(char),
}

/// A complete feedback pattern for a 5-letter guess.
/// Encoded as a single u8 value (0-242).
/// Each position can be 0 (absent), 1 (present), or 2 (correct).
/// Pattern = p0 + 3*p1 + 9*p2 + 27*p3 + 81*p4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackPattern(u8);

impl FeedbackPattern {
    /// The pattern indicating all correct (winning)
    pub const ALL_CORRECT: Self = Self(2 + 2 * 3 + 2 * 9 + 2 * 27 + 2 * 81); // 242

    pub const ALL_ABSENT: Self = Self(0);

    /// Total number of possible patterns (3^5)
    pub const NUM_PATTERNS: usize = 243;

    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: [Feedback; WORD_LENGTH]) -> Self {
        let mut pattern: u8 = 0;
        let mut multiplier: u8 = 1;
        for fb in feedbacks {
            pattern += fb.digit() * multiplier;
            multiplier *= 3;
        }
        Self(pattern)
    }

    /// Calculate the feedback pattern for a guess against a target word.
    ///
    /// Exact matches are resolved first, then misplaced letters left to
    /// right against what remains of the target, so a repeated guess letter
    /// never earns more yellows than the target has spare copies.
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let guess_bytes = guess.as_bytes();
        let target_bytes = target.as_bytes();

        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        let mut target_remaining = [0u8; 26];

        for i in 0..WORD_LENGTH {
            if guess_bytes[i] == target_bytes[i] {
                feedback[i] = Feedback::Correct;
            } else {
                target_remaining[(target_bytes[i] - b'a') as usize] += 1;
            }
        }

        for i in 0..WORD_LENGTH {
            if feedback[i] != Feedback::Correct {
                let idx = (guess_bytes[i] - b'a') as usize;
                if target_remaining[idx] > 0 {
                    feedback[i] = Feedback::Present;
                    target_remaining[idx] -= 1;
                }
            }
        }

        Self::new(feedback)
    }

    /// Dense index in `0..NUM_PATTERNS`, used for tallying.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert pattern to array of feedbacks
    pub fn to_feedbacks(self) -> [Feedback; WORD_LENGTH] {
        let mut pattern = self.0;
        let mut feedbacks = [Feedback::Absent; WORD_LENGTH];
        for feedback in feedbacks.iter_mut() {
            *feedback = match pattern % 3 {
                0 => Feedback::Absent,
                1 => Feedback::Present,
                _ => Feedback::Correct,
            };
            pattern /= 3;
        }
        feedbacks
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(self) -> bool {
        self == Self::ALL_CORRECT
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_emoji()).collect()
    }
}

impl FromStr for FeedbackPattern {
    type Err = PatternError;

    /// Parse a pattern from a string like "GYBBB", "gybbb" or "21000".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let count = s.chars().count();
        if count != WORD_LENGTH {
            return Err(PatternError::Length(count));
        }
        let mut feedbacks = [Feedback::Absent; WORD_LENGTH];
        for (slot, c) in feedbacks.iter_mut().zip(s.chars()) {
            *slot = Feedback::from_char(c).ok_or(PatternError::Symbol(c))?;
        }
        Ok(Self::new(feedbacks))
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fb in self.to_feedbacks() {
            write!(f, "{}", fb.to_char())?;
        }
        Ok(())
    }
}

impl Serialize for FeedbackPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FeedbackPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
