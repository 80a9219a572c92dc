//! Request-level facade over the selection engine.
//!
//! The advisor owns the two word universes for the lifetime of the process
//! and answers each request from scratch: nothing about a game is kept
//! between calls.

use std::sync::atomic::AtomicBool;

use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::feedback::FeedbackPattern;
use crate::solver::{self, GuessRecord, GuessScore, Suggestion, CANDIDATE_BIAS};
use crate::word::Word;
use crate::wordlist::WordList;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisorConfig {
    /// Ratio by which a non-candidate must beat the best candidate.
    pub bias: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            bias: CANDIDATE_BIAS,
        }
    }
}

impl AdvisorConfig {
    /// The bias must be a number no smaller than 1.
    pub fn validate(&self) -> Result<()> {
        if self.bias.is_nan() || self.bias < 1.0 {
            return Err(Error::InvalidBias(self.bias));
        }
        Ok(())
    }
}

/// What a request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The next word to play. `remaining` is the number of answers still
    /// consistent with the history; zero means the history contradicts
    /// itself and the guess is best-effort.
    Guess { guess: GuessScore, remaining: usize },
    /// A guess in the history is not in the vocabulary.
    NotAWord(Word),
    NoGuessAvailable,
}

/// Guess-count distribution from self-play over every answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkReport {
    /// `(guesses, games)` pairs for games that were won, ascending.
    pub distribution: Vec<(usize, usize)>,
    /// Games not won within the round limit.
    pub failures: usize,
}

impl BenchmarkReport {
    pub fn games(&self) -> usize {
        self.distribution.iter().map(|(_, c)| c).sum::<usize>() + self.failures
    }

    /// Mean guesses over won games.
    pub fn average(&self) -> f64 {
        let won: usize = self.distribution.iter().map(|(_, c)| c).sum();
        if won == 0 {
            return 0.0;
        }
        let total: usize = self.distribution.iter().map(|(g, c)| g * c).sum();
        total as f64 / won as f64
    }
}

#[derive(Debug, Clone)]
pub struct WordleAdvisor {
    vocabulary: WordList,
    answers: WordList,
    config: AdvisorConfig,
}

impl WordleAdvisor {
    pub fn new(vocabulary: WordList, answers: WordList) -> Self {
        Self {
            vocabulary,
            answers,
            config: AdvisorConfig::default(),
        }
    }

    pub fn with_config(
        vocabulary: WordList,
        answers: WordList,
        config: AdvisorConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            vocabulary,
            answers,
            config,
        })
    }

    pub fn vocabulary(&self) -> &WordList {
        &self.vocabulary
    }

    pub fn answers(&self) -> &WordList {
        &self.answers
    }

    pub fn config(&self) -> AdvisorConfig {
        self.config
    }

    /// The first history guess missing from the vocabulary, if any.
    pub fn unknown_guess(&self, history: &[GuessRecord]) -> Option<Word> {
        history
            .iter()
            .map(|record| record.guess)
            .find(|guess| !self.vocabulary.contains(guess))
    }

    /// Answers consistent with every record of the history.
    pub fn candidates(&self, history: &[GuessRecord]) -> Vec<Word> {
        solver::narrow(self.answers.words(), history)
    }

    pub fn select(&self, candidates: &[Word]) -> Suggestion {
        solver::select_guess(self.vocabulary.words(), candidates, self.config.bias)
    }

    /// Validate the history, narrow the answers and pick the next guess.
    pub fn advise(&self, history: &[GuessRecord]) -> Outcome {
        self.advise_until(history, &AtomicBool::new(false))
            .unwrap_or(Outcome::NoGuessAvailable)
    }

    /// Like [`advise`](Self::advise), but returns `None` as soon as `cancel`
    /// is observed during scoring.
    pub fn advise_until(&self, history: &[GuessRecord], cancel: &AtomicBool) -> Option<Outcome> {
        if let Some(word) = self.unknown_guess(history) {
            debug!("Rejecting history: '{}' is not in the vocabulary", word);
            return Some(Outcome::NotAWord(word));
        }

        let candidates = self.candidates(history);
        debug!(
            "{} of {} answers remain after {} guesses",
            candidates.len(),
            self.answers.len(),
            history.len()
        );

        let suggestion = solver::select_guess_until(
            self.vocabulary.words(),
            &candidates,
            self.config.bias,
            cancel,
        );
        let Some(suggestion) = suggestion else {
            debug!("Scoring cancelled");
            return None;
        };
        Some(match suggestion {
            Suggestion::Guess(guess) => {
                debug!(
                    "Suggesting '{}' (score {:.3}, candidate: {})",
                    guess.word, guess.score, guess.is_candidate
                );
                Outcome::Guess {
                    guess,
                    remaining: candidates.len(),
                }
            }
            Suggestion::NoGuessAvailable => Outcome::NoGuessAvailable,
        })
    }

    /// The `n` best-scoring guesses for the given history.
    pub fn top_guesses(&self, history: &[GuessRecord], n: usize) -> Vec<GuessScore> {
        let candidates = self.candidates(history);
        solver::rank_guesses(self.vocabulary.words(), &candidates, n)
    }

    /// Play against a known target, letting `get_feedback` score each
    /// guess. Stops on a win, when no guess is available, or after
    /// `max_rounds` guesses.
    pub fn solve_with_feedback<F>(&self, max_rounds: usize, mut get_feedback: F) -> Vec<GuessRecord>
    where
        F: FnMut(&Word) -> FeedbackPattern,
    {
        let mut history = Vec::new();
        let mut candidates = self.answers.words().to_vec();

        while history.len() < max_rounds {
            let guess = match self.select(&candidates) {
                Suggestion::Guess(g) => g.word,
                Suggestion::NoGuessAvailable => break,
            };

            let feedback = get_feedback(&guess);
            history.push(GuessRecord::new(guess, feedback));
            if feedback.is_win() {
                break;
            }
            candidates = solver::filter_candidates(&candidates, &guess, feedback);
        }

        history
    }

    /// Self-play against `target`.
    pub fn solve_for_target(&self, target: &Word, max_rounds: usize) -> Vec<GuessRecord> {
        self.solve_with_feedback(max_rounds, |guess| FeedbackPattern::calculate(guess, target))
    }

    /// Self-play against every answer in parallel.
    pub fn benchmark_distribution(&self, max_rounds: usize) -> BenchmarkReport {
        let outcomes: Vec<Option<usize>> = self
            .answers
            .words()
            .par_iter()
            .map(|target| {
                let history = self.solve_for_target(target, max_rounds);
                match history.last() {
                    Some(last) if last.feedback.is_win() => Some(history.len()),
                    _ => None,
                }
            })
            .collect();

        let mut report = BenchmarkReport::default();
        let max_guesses = outcomes.iter().flatten().copied().max().unwrap_or(0);
        let mut counts = vec![0usize; max_guesses + 1];
        for outcome in outcomes {
            match outcome {
                Some(guesses) => counts[guesses] += 1,
                None => report.failures += 1,
            }
        }
        report.distribution = counts
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect();
        report
    }
}
