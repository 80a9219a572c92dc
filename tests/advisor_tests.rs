use std::sync::atomic::AtomicBool;

use wordle_advisor::{
    AdvisorConfig, Error, FeedbackPattern, GuessRecord, Outcome, Word, WordList, WordleAdvisor,
    MAX_GUESSES,
};

fn w(s: &str) -> Word {
    s.parse().unwrap()
}

fn record(guess: &str, feedback: &str) -> GuessRecord {
    GuessRecord::new(w(guess), feedback.parse().unwrap())
}

fn test_answers() -> WordList {
    WordList::parse([
        "crane", "slate", "toast", "moist", "pious", "lusty", "bumpy", "night", "quilt", "fjord",
    ])
    .unwrap()
}

fn test_advisor() -> WordleAdvisor {
    let answers = test_answers();
    let vocabulary = WordList::from_words(
        answers
            .iter()
            .copied()
            .chain(["pudgy", "misty"].into_iter().map(w)),
    );
    WordleAdvisor::new(vocabulary, answers)
}

#[test]
fn test_opening_guess() {
    let advisor = test_advisor();
    match advisor.advise(&[]) {
        Outcome::Guess { guess, remaining } => {
            assert_eq!(guess.word, w("pious"));
            assert!(guess.is_candidate);
            assert_eq!(remaining, 10);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_advise_after_feedback() {
    let advisor = test_advisor();
    match advisor.advise(&[record("crane", "BBBBB")]) {
        Outcome::Guess { guess, remaining } => {
            assert_eq!(guess.word, w("moist"));
            assert_eq!(remaining, 5);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_guess_outside_answers_is_accepted() {
    let advisor = test_advisor();
    let outcome = advisor.advise(&[record("pudgy", "BBBBB")]);
    assert!(matches!(outcome, Outcome::Guess { .. }));
}

#[test]
fn test_unknown_guess_is_not_a_word() {
    let advisor = test_advisor();
    let history = [record("crane", "BBBBB"), record("zzzzz", "BBBBB")];
    assert_eq!(advisor.unknown_guess(&history), Some(w("zzzzz")));
    assert_eq!(advisor.advise(&history), Outcome::NotAWord(w("zzzzz")));
}

#[test]
fn test_contradictory_history_still_guesses() {
    let advisor = test_advisor();
    let history = [record("crane", "BBBBB"), record("crane", "GGGGG")];
    assert!(advisor.candidates(&history).is_empty());

    match advisor.advise(&history) {
        Outcome::Guess { guess, remaining } => {
            assert_eq!(remaining, 0);
            assert_eq!(guess.word, advisor.vocabulary().words()[0]);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_winning_history_suggests_the_answer() {
    let advisor = test_advisor();
    match advisor.advise(&[record("quilt", "GGGGG")]) {
        Outcome::Guess { guess, remaining } => {
            assert_eq!(guess.word, w("quilt"));
            assert_eq!(remaining, 1);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_empty_vocabulary_has_no_guess() {
    let advisor = WordleAdvisor::new(WordList::default(), test_answers());
    assert_eq!(advisor.advise(&[]), Outcome::NoGuessAvailable);
}

#[test]
fn test_requests_are_independent() {
    let advisor = test_advisor();
    let first = advisor.advise(&[]);
    let _ = advisor.advise(&[record("crane", "BBBBB")]);
    assert_eq!(advisor.advise(&[]), first);
}

#[test]
fn test_bias_config() {
    let advisor = WordleAdvisor::with_config(
        test_answers(),
        test_answers(),
        AdvisorConfig { bias: 2.0 },
    )
    .unwrap();
    assert_eq!(advisor.config().bias, 2.0);
    assert_eq!(AdvisorConfig::default().bias, wordle_advisor::CANDIDATE_BIAS);
}

#[test]
fn test_bias_config_rejects_invalid() {
    for bias in [f64::NAN, 0.5, -1.0] {
        let result =
            WordleAdvisor::with_config(test_answers(), test_answers(), AdvisorConfig { bias });
        assert!(
            matches!(result, Err(Error::InvalidBias(_))),
            "bias {} accepted",
            bias
        );
    }
    assert!(AdvisorConfig { bias: 1.0 }.validate().is_ok());
}

#[test]
fn test_cancelled_advice() {
    let advisor = test_advisor();
    assert_eq!(advisor.advise_until(&[], &AtomicBool::new(true)), None);
    // Rejection happens before any scoring.
    assert_eq!(
        advisor.advise_until(&[record("zzzzz", "BBBBB")], &AtomicBool::new(true)),
        Some(Outcome::NotAWord(w("zzzzz")))
    );
    assert_eq!(
        advisor.advise_until(&[], &AtomicBool::new(false)),
        Some(advisor.advise(&[]))
    );
}

#[test]
fn test_top_guesses() {
    let advisor = test_advisor();
    let top = advisor.top_guesses(&[], 5);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].word, w("pious"));
    for i in 1..top.len() {
        assert!(top[i - 1].score <= top[i].score);
    }
}

#[test]
fn test_solve_for_target() {
    let advisor = test_advisor();
    let guesses = advisor.solve_for_target(&w("quilt"), MAX_GUESSES);

    assert_eq!(
        guesses,
        vec![record("pious", "BYBYB"), record("quilt", "GGGGG")]
    );
}

#[test]
fn test_solve_various_targets() {
    let advisor = test_advisor();
    for target in advisor.answers().iter() {
        let guesses = advisor.solve_for_target(target, MAX_GUESSES);
        let last = guesses.last().expect("at least one guess");
        assert!(last.feedback.is_win(), "Didn't win for target: {}", target);
        assert_eq!(last.guess, *target);
        assert!(guesses.len() <= 2, "Too many guesses for target: {}", target);
    }
}

#[test]
fn test_solve_respects_round_limit() {
    let advisor = test_advisor();
    // Not an answer, so it can never be guessed.
    let guesses = advisor.solve_for_target(&w("misty"), 3);
    assert_eq!(guesses.len(), 3);
    assert!(guesses.iter().all(|r| !r.feedback.is_win()));
}

#[test]
fn test_solve_with_feedback_stops_on_win() {
    let advisor = test_advisor();
    let guesses = advisor.solve_with_feedback(MAX_GUESSES, |_| FeedbackPattern::ALL_CORRECT);
    assert_eq!(guesses.len(), 1);
}

#[test]
fn test_benchmark_distribution() {
    let advisor = test_advisor();
    let report = advisor.benchmark_distribution(MAX_GUESSES);
    assert_eq!(report.distribution, vec![(1, 1), (2, 9)]);
    assert_eq!(report.failures, 0);
    assert_eq!(report.games(), 10);
    assert!((report.average() - 1.9).abs() < 1e-12);
}
