//! Guess selection engine.
//!
//! A guess is scored by partitioning the remaining candidates according to
//! the feedback pattern it would produce against each of them, and summing
//! `count * ln(count)` over the groups. Under a uniform prior this is, up to
//! sign and a constant, the Shannon entropy of the outcome, so a lower score
//! means a more informative guess.
//!
//! The selector prefers a guess that could itself be the answer unless a
//! word outside the candidate set is better by more than the bias factor.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::feedback::FeedbackPattern;
use crate::word::Word;

/// How much better (as a ratio of scores) a non-candidate guess must be
/// before it is preferred over the best candidate.
pub const CANDIDATE_BIAS: f64 = 1.05;

/// One completed round: the word guessed and the feedback it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: Word,
    pub feedback: FeedbackPattern,
}

impl GuessRecord {
    pub fn new(guess: Word, feedback: FeedbackPattern) -> Self {
        Self { guess, feedback }
    }

    /// Build a record from user input such as `("raise", "BYBBG")`.
    pub fn parse(guess: &str, feedback: &str) -> Result<Self> {
        Ok(Self::new(guess.parse()?, feedback.parse()?))
    }
}

/// A vocabulary word together with its score against a candidate set.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessScore {
    pub word: Word,
    pub score: f64,
    pub is_candidate: bool,
}

impl GuessScore {
    /// Shannon entropy in bits of the outcome distribution over
    /// `candidates` equally likely answers, recovered from the score.
    pub fn entropy_bits(&self, candidates: usize) -> f64 {
        if candidates == 0 {
            return 0.0;
        }
        let n = candidates as f64;
        (n.ln() - self.score / n).max(0.0) / std::f64::consts::LN_2
    }
}

/// Result of a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    Guess(GuessScore),
    NoGuessAvailable,
}

impl Suggestion {
    pub fn word(&self) -> Option<Word> {
        match self {
            Suggestion::Guess(g) => Some(g.word),
            Suggestion::NoGuessAvailable => None,
        }
    }
}

/// Keep the candidates that would have produced `observed` for `guess`.
pub fn filter_candidates(candidates: &[Word], guess: &Word, observed: FeedbackPattern) -> Vec<Word> {
    candidates
        .iter()
        .filter(|target| FeedbackPattern::calculate(guess, target) == observed)
        .copied()
        .collect()
}

/// Apply every record in order, starting from `answers`.
pub fn narrow(answers: &[Word], history: &[GuessRecord]) -> Vec<Word> {
    let mut candidates = answers.to_vec();
    for record in history {
        candidates = filter_candidates(&candidates, &record.guess, record.feedback);
    }
    candidates
}

/// Number of candidates falling into each feedback pattern.
pub fn pattern_counts(guess: &Word, candidates: &[Word]) -> [u32; FeedbackPattern::NUM_PATTERNS] {
    let mut counts = [0u32; FeedbackPattern::NUM_PATTERNS];
    for target in candidates {
        counts[FeedbackPattern::calculate(guess, target).index()] += 1;
    }
    counts
}

/// Σ count·ln(count) over the pattern groups; lower is better.
///
/// An empty candidate set scores `f64::MAX`.
pub fn score_guess(guess: &Word, candidates: &[Word]) -> f64 {
    if candidates.is_empty() {
        return f64::MAX;
    }
    pattern_counts(guess, candidates)
        .iter()
        .filter(|&&count| count > 1)
        .map(|&count| {
            let count = count as f64;
            count * count.ln()
        })
        .sum()
}

/// Score every vocabulary word, in vocabulary order.
pub fn score_vocabulary(vocabulary: &[Word], candidates: &[Word]) -> Vec<GuessScore> {
    score_vocabulary_until(vocabulary, candidates, &AtomicBool::new(false)).unwrap_or_default()
}

/// Like [`score_vocabulary`], but gives up with `None` once `cancel` is set.
///
/// The flag is checked before each word, so a cancelled call releases the
/// rayon pool after at most one `score_guess` per worker.
pub fn score_vocabulary_until(
    vocabulary: &[Word],
    candidates: &[Word],
    cancel: &AtomicBool,
) -> Option<Vec<GuessScore>> {
    let candidate_set: HashSet<&Word> = candidates.iter().collect();
    vocabulary
        .par_iter()
        .map(|word| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            Some(GuessScore {
                word: *word,
                score: score_guess(word, candidates),
                is_candidate: candidate_set.contains(word),
            })
        })
        .collect()
}

/// Pick the next guess.
///
/// Ties keep the earliest vocabulary word. With no candidates left the best
/// overall word is still returned; only an empty vocabulary yields
/// [`Suggestion::NoGuessAvailable`].
pub fn select_guess(vocabulary: &[Word], candidates: &[Word], bias: f64) -> Suggestion {
    select_from_scores(&score_vocabulary(vocabulary, candidates), bias)
}

/// Cancellable [`select_guess`]; `None` means `cancel` was set first.
pub fn select_guess_until(
    vocabulary: &[Word],
    candidates: &[Word],
    bias: f64,
    cancel: &AtomicBool,
) -> Option<Suggestion> {
    let scores = score_vocabulary_until(vocabulary, candidates, cancel)?;
    Some(select_from_scores(&scores, bias))
}

fn select_from_scores(scores: &[GuessScore], bias: f64) -> Suggestion {
    let mut best_overall: Option<&GuessScore> = None;
    let mut best_candidate: Option<&GuessScore> = None;
    for scored in scores {
        if best_overall.map_or(true, |best| scored.score < best.score) {
            best_overall = Some(scored);
        }
        if scored.is_candidate && best_candidate.map_or(true, |best| scored.score < best.score) {
            best_candidate = Some(scored);
        }
    }

    match (best_candidate, best_overall) {
        (_, None) => Suggestion::NoGuessAvailable,
        (Some(candidate), Some(overall)) if candidate.score <= bias * overall.score => {
            Suggestion::Guess(candidate.clone())
        }
        (_, Some(overall)) => Suggestion::Guess(overall.clone()),
    }
}

/// The `n` best guesses: lowest score first, candidates before
/// non-candidates on equal scores, then vocabulary order.
pub fn rank_guesses(vocabulary: &[Word], candidates: &[Word], n: usize) -> Vec<GuessScore> {
    let mut scores = score_vocabulary(vocabulary, candidates);
    scores.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| b.is_candidate.cmp(&a.is_candidate))
    });
    scores.truncate(n);
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn singleton_groups_score_zero() {
        let candidates = words(&["crane", "slate"]);
        let guess: Word = "crane".parse().unwrap();
        assert_eq!(score_guess(&guess, &candidates), 0.0);
    }

    #[test]
    fn one_group_scores_n_ln_n() {
        let candidates = words(&["fuzzy", "dizzy", "bulky"]);
        let guess: Word = "crane".parse().unwrap();
        let expected = 3.0 * 3f64.ln();
        assert!((score_guess(&guess, &candidates) - expected).abs() < 1e-12);
    }

    #[test]
    fn entropy_bits_recovers_perfect_split() {
        let scored = GuessScore {
            word: "crane".parse().unwrap(),
            score: 0.0,
            is_candidate: true,
        };
        assert!((scored.entropy_bits(4) - 2.0).abs() < 1e-12);
        assert_eq!(scored.entropy_bits(0), 0.0);
    }

    #[test]
    fn cancelled_scoring_stops() {
        let vocabulary = words(&["crane", "slate", "toast"]);
        let cancel = AtomicBool::new(true);
        assert_eq!(score_vocabulary_until(&vocabulary, &vocabulary, &cancel), None);
        assert_eq!(select_guess_until(&vocabulary, &vocabulary, CANDIDATE_BIAS, &cancel), None);

        let idle = AtomicBool::new(false);
        assert_eq!(
            select_guess_until(&vocabulary, &vocabulary, CANDIDATE_BIAS, &idle),
            Some(select_guess(&vocabulary, &vocabulary, CANDIDATE_BIAS))
        );
    }
}
