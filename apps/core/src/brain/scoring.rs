//! Intake scoring.
//!
//! Turns questionnaire answers into depression and anxiety sub-scores, a coarse mood and
//! the safety flag. Only the designated scored questions take part; the remaining items
//! (sleep, academic, social, ADHD, PTSD) are collected but not scored.

use chrono::Utc;
use tracing::debug;

use super::questionnaire::{QuestionnaireAnswers, YES};
use crate::models::{IntakeMood, IntakeScore};

/// Questions summed into the depression sub-score
pub const DEPRESSION_ITEMS: [u32; 2] = [1, 2];
/// Questions summed into the anxiety sub-score
pub const ANXIETY_ITEMS: [u32; 2] = [3, 4];
/// Question whose "yes" answer sets `needs_support`
pub const SAFETY_ITEM: u32 = 10;

/// A sub-score at or above this marks the user as struggling
const STRUGGLING_THRESHOLD: u32 = 4;
/// Both sub-scores at or below this mark the user as doing well
const GOOD_CEILING: u32 = 1;

/// Scorer for the intake questionnaire
#[derive(Debug, Default, Clone, Copy)]
pub struct IntakeScorer;

impl IntakeScorer {
    pub fn new() -> Self {
        Self
    }

    /// Value of one scored answer; missing or non-numeric answers count as zero.
    fn item_value(answers: &QuestionnaireAnswers, question_id: u32) -> u32 {
        answers
            .get(question_id)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0)
    }

    /// Saturates instead of overflowing on out-of-range numeric answers.
    fn sub_score(answers: &QuestionnaireAnswers, items: &[u32]) -> u32 {
        items
            .iter()
            .map(|&id| Self::item_value(answers, id))
            .fold(0, u32::saturating_add)
    }

    /// Classify mood from the two sub-scores.
    pub fn classify_mood(depression: u32, anxiety: u32) -> IntakeMood {
        if depression >= STRUGGLING_THRESHOLD || anxiety >= STRUGGLING_THRESHOLD {
            IntakeMood::Struggling
        } else if depression <= GOOD_CEILING && anxiety <= GOOD_CEILING {
            IntakeMood::Good
        } else {
            IntakeMood::Neutral
        }
    }

    /// Score a possibly partial answer set. Never fails.
    pub fn score(&self, answers: &QuestionnaireAnswers) -> IntakeScore {
        let depression_score = Self::sub_score(answers, &DEPRESSION_ITEMS);
        let anxiety_score = Self::sub_score(answers, &ANXIETY_ITEMS);
        let mood = Self::classify_mood(depression_score, anxiety_score);
        let needs_support = answers.get(SAFETY_ITEM) == Some(YES);

        debug!(
            depression_score,
            anxiety_score,
            mood = mood.label(),
            needs_support,
            "intake scored"
        );

        IntakeScore {
            depression_score,
            anxiety_score,
            mood,
            needs_support,
            computed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(u32, &str)]) -> QuestionnaireAnswers {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn test_struggling_from_depression() {
        let score = IntakeScorer::new().score(&answers(&[(1, "3"), (2, "3"), (3, "0"), (4, "0")]));
        assert_eq!(score.depression_score, 6);
        assert_eq!(score.anxiety_score, 0);
        assert_eq!(score.mood, IntakeMood::Struggling);
    }

    #[test]
    fn test_good_at_ceiling() {
        let score = IntakeScorer::new().score(&answers(&[(1, "0"), (2, "1"), (3, "0"), (4, "0")]));
        assert_eq!(score.depression_score, 1);
        assert_eq!(score.mood, IntakeMood::Good);
    }

    #[test]
    fn test_neutral_in_between() {
        let score = IntakeScorer::new().score(&answers(&[(1, "1"), (2, "1"), (3, "1"), (4, "1")]));
        assert_eq!(score.depression_score, 2);
        assert_eq!(score.anxiety_score, 2);
        assert_eq!(score.mood, IntakeMood::Neutral);
    }

    #[test]
    fn test_threshold_edges() {
        assert_eq!(IntakeScorer::classify_mood(3, 3), IntakeMood::Neutral);
        assert_eq!(IntakeScorer::classify_mood(0, 4), IntakeMood::Struggling);
        assert_eq!(IntakeScorer::classify_mood(1, 2), IntakeMood::Neutral);
        assert_eq!(IntakeScorer::classify_mood(1, 1), IntakeMood::Good);
    }

    #[test]
    fn test_safety_flag_independent_of_mood() {
        let score = IntakeScorer::new().score(&answers(&[
            (1, "0"),
            (2, "0"),
            (3, "0"),
            (4, "0"),
            (10, "yes"),
        ]));
        assert_eq!(score.mood, IntakeMood::Good);
        assert!(score.needs_support);
    }

    #[test]
    fn test_partial_and_garbage_answers_default_to_zero() {
        let scorer = IntakeScorer::new();

        let empty = scorer.score(&QuestionnaireAnswers::new());
        assert_eq!(empty.depression_score, 0);
        assert_eq!(empty.anxiety_score, 0);
        assert_eq!(empty.mood, IntakeMood::Good);
        assert!(!empty.needs_support);

        let garbage = scorer.score(&answers(&[(1, "often"), (2, "2"), (10, "Yes")]));
        assert_eq!(garbage.depression_score, 2);
        assert!(!garbage.needs_support);
    }

    #[test]
    fn test_huge_answers_saturate() {
        let score = IntakeScorer::new().score(&answers(&[(1, "4294967295"), (2, "1"), (3, "2")]));
        assert_eq!(score.depression_score, u32::MAX);
        assert_eq!(score.anxiety_score, 2);
        assert_eq!(score.mood, IntakeMood::Struggling);
    }

    #[test]
    fn test_unscored_items_are_ignored() {
        let score = IntakeScorer::new().score(&answers(&[(5, "1"), (6, "5"), (8, "4"), (9, "yes")]));
        assert_eq!(score.depression_score, 0);
        assert_eq!(score.anxiety_score, 0);
        assert!(!score.needs_support);
    }
}
