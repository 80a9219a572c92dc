use wordle_advisor::{Feedback, FeedbackPattern, PatternError, Word};

use Feedback::{Absent, Correct, Present};

fn w(s: &str) -> Word {
    s.parse().unwrap()
}

fn calc(guess: &str, target: &str) -> [Feedback; 5] {
    FeedbackPattern::calculate(&w(guess), &w(target)).to_feedbacks()
}

#[test]
fn test_all_correct() {
    let pattern = FeedbackPattern::calculate(&w("crane"), &w("crane"));
    assert!(pattern.is_win());
    assert_eq!(pattern, FeedbackPattern::ALL_CORRECT);
}

#[test]
fn test_all_absent() {
    let pattern = FeedbackPattern::calculate(&w("quick"), &w("dream"));
    assert_eq!(pattern, FeedbackPattern::ALL_ABSENT);
    assert_eq!(pattern.to_string(), "BBBBB");
}

#[test]
fn test_mixed_feedback() {
    assert_eq!(calc("crane", "charm"), [Correct, Present, Correct, Absent, Absent]);
}

#[test]
fn test_repeated_letters_do_not_double_count() {
    // s p e e d / e r a s e: no exact matches; the target has two e's, so
    // both guessed e's are yellow, s is yellow, p and d are gray.
    assert_eq!(calc("speed", "erase"), [Present, Absent, Present, Present, Absent]);
    // The green e uses up the target's only e.
    assert_eq!(calc("eerie", "abide"), [Absent, Absent, Absent, Present, Correct]);
    assert_eq!(calc("eerie", "trace"), [Absent, Absent, Present, Absent, Correct]);
}

#[test]
fn test_duplicate_letters_in_guess() {
    assert_eq!(calc("speed", "creep"), [Absent, Present, Correct, Correct, Absent]);
}

#[test]
fn test_duplicate_letters_in_target() {
    assert_eq!(calc("arose", "creep"), [Absent, Correct, Absent, Absent, Present]);
}

#[test]
fn test_green_consumes_before_yellow() {
    // Both of the target's l's are taken by greens, so the leading l is gray.
    assert_eq!(calc("lolly", "hello"), [Absent, Present, Correct, Correct, Absent]);
    assert_eq!(calc("geese", "creep"), [Absent, Present, Correct, Absent, Absent]);
}

#[test]
fn test_correct_iff_same_letter() {
    let words = ["crane", "speed", "erase", "lolly", "hello", "geese", "abide"];
    for guess in words {
        for target in words {
            let feedbacks = calc(guess, target);
            assert_eq!(feedbacks.len(), guess.len());
            for (i, fb) in feedbacks.iter().enumerate() {
                let same = guess.as_bytes()[i] == target.as_bytes()[i];
                assert_eq!(*fb == Correct, same, "{} vs {} at {}", guess, target, i);
            }
        }
    }
}

#[test]
fn test_calculate_is_deterministic() {
    let first = FeedbackPattern::calculate(&w("sores"), &w("those"));
    for _ in 0..10 {
        assert_eq!(FeedbackPattern::calculate(&w("sores"), &w("those")), first);
    }
}

#[test]
fn test_pattern_encoding_decoding() {
    let words = ["crane", "speed", "erase", "sores", "those"];
    for guess in words {
        for target in words {
            let pattern = FeedbackPattern::calculate(&w(guess), &w(target));
            assert_eq!(FeedbackPattern::new(pattern.to_feedbacks()), pattern);
            assert!(pattern.index() < FeedbackPattern::NUM_PATTERNS);
        }
    }
}

#[test]
fn test_pattern_parse() {
    let pattern: FeedbackPattern = "GYBBB".parse().unwrap();
    assert_eq!(pattern.to_feedbacks(), [Correct, Present, Absent, Absent, Absent]);

    let lower: FeedbackPattern = "gybbb".parse().unwrap();
    let digits: FeedbackPattern = "21000".parse().unwrap();
    assert_eq!(pattern, lower);
    assert_eq!(pattern, digits);
    assert_eq!(pattern.to_string(), "GYBBB");
}

#[test]
fn test_pattern_parse_invalid() {
    assert_eq!("gybbb1".parse::<FeedbackPattern>(), Err(PatternError::Length(6)));
    assert_eq!("gybb".parse::<FeedbackPattern>(), Err(PatternError::Length(4)));
    assert_eq!("gybzb".parse::<FeedbackPattern>(), Err(PatternError::Symbol('z')));
}

#[test]
fn test_emoji_display() {
    let pattern = FeedbackPattern::new([Correct, Present, Absent, Absent, Correct]);
    assert_eq!(pattern.to_emoji_string(), "🟩🟨⬛⬛🟩");
}

#[test]
fn test_specific_wordle_cases() {
    assert_eq!(calc("sores", "those"), [Present, Present, Absent, Present, Absent]);
}

#[test]
fn test_pattern_json() {
    let pattern: FeedbackPattern = serde_json::from_str("\"bybbg\"").unwrap();
    assert_eq!(serde_json::to_string(&pattern).unwrap(), "\"BYBBG\"");
    assert!(serde_json::from_str::<FeedbackPattern>("\"BYB\"").is_err());
}
