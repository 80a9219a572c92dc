//! # Wordle Advisor
//!
//! Recommends the next Wordle guess from the history of guesses and their
//! feedback.
//!
//! Every vocabulary word is scored against the answers still consistent
//! with the history by how evenly its feedback patterns split them. A word
//! that could itself be the answer is preferred unless some other word is
//! clearly more informative.

pub mod advisor;
pub mod error;
pub mod feedback;
pub mod server;
pub mod solver;
pub mod word;
pub mod wordlist;

pub use advisor::{AdvisorConfig, BenchmarkReport, Outcome, WordleAdvisor};
pub use error::{Error, Result};
pub use feedback::{Feedback, FeedbackPattern, PatternError};
pub use solver::{GuessRecord, GuessScore, Suggestion, CANDIDATE_BIAS};
pub use word::{Word, WordError};
pub use wordlist::WordList;

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;

/// Guesses allowed in one game
pub const MAX_GUESSES: usize = 6;
