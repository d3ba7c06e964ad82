//! Intake questionnaire catalogue and the step-by-step assessment wizard.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::AppError;

/// Screening area a question belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionCategory {
    Depression,
    Anxiety,
    Sleep,
    Academic,
    Social,
    #[serde(rename = "ADHD")]
    Adhd,
    #[serde(rename = "PTSD")]
    Ptsd,
    Safety,
}

/// How the options of a question are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Scale,
    YesNo,
    Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub category: QuestionCategory,
    pub text: &'static str,
    pub kind: QuestionKind,
    pub options: &'static [AnswerOption],
}

impl Question {
    pub fn accepts(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

const FREQUENCY_OPTIONS: &[AnswerOption] = &[
    AnswerOption { value: "0", label: "Not at all" },
    AnswerOption { value: "1", label: "Several days" },
    AnswerOption { value: "2", label: "More than half the days" },
    AnswerOption { value: "3", label: "Nearly every day" },
];

/// The sentinel value a yes/no question stores for "yes".
pub const YES: &str = "yes";

/// Ordered intake catalogue.
pub const QUESTIONS: &[Question] = &[
    Question {
        id: 1,
        category: QuestionCategory::Depression,
        text: "Over the last 2 weeks, how often have you felt little interest or pleasure in doing things?",
        kind: QuestionKind::Frequency,
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 2,
        category: QuestionCategory::Depression,
        text: "How often have you felt down, depressed, or hopeless?",
        kind: QuestionKind::Frequency,
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 3,
        category: QuestionCategory::Anxiety,
        text: "How often have you felt nervous, anxious, or on edge?",
        kind: QuestionKind::Frequency,
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 4,
        category: QuestionCategory::Anxiety,
        text: "How often have you been unable to stop or control worrying?",
        kind: QuestionKind::Frequency,
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 5,
        category: QuestionCategory::Sleep,
        text: "How would you rate your sleep quality over the past week?",
        kind: QuestionKind::Scale,
        options: &[
            AnswerOption { value: "1", label: "Very poor" },
            AnswerOption { value: "2", label: "Poor" },
            AnswerOption { value: "3", label: "Fair" },
            AnswerOption { value: "4", label: "Good" },
            AnswerOption { value: "5", label: "Excellent" },
        ],
    },
    Question {
        id: 6,
        category: QuestionCategory::Academic,
        text: "How stressed have you felt about your academic performance?",
        kind: QuestionKind::Scale,
        options: &[
            AnswerOption { value: "1", label: "Not stressed" },
            AnswerOption { value: "2", label: "Slightly stressed" },
            AnswerOption { value: "3", label: "Moderately stressed" },
            AnswerOption { value: "4", label: "Very stressed" },
            AnswerOption { value: "5", label: "Extremely stressed" },
        ],
    },
    Question {
        id: 7,
        category: QuestionCategory::Social,
        text: "How connected do you feel to your peers and community?",
        kind: QuestionKind::Scale,
        options: &[
            AnswerOption { value: "1", label: "Very disconnected" },
            AnswerOption { value: "2", label: "Somewhat disconnected" },
            AnswerOption { value: "3", label: "Neutral" },
            AnswerOption { value: "4", label: "Somewhat connected" },
            AnswerOption { value: "5", label: "Very connected" },
        ],
    },
    Question {
        id: 8,
        category: QuestionCategory::Adhd,
        text: "How often do you have trouble concentrating on tasks or activities?",
        kind: QuestionKind::Frequency,
        options: &[
            AnswerOption { value: "0", label: "Never" },
            AnswerOption { value: "1", label: "Rarely" },
            AnswerOption { value: "2", label: "Sometimes" },
            AnswerOption { value: "3", label: "Often" },
            AnswerOption { value: "4", label: "Very often" },
        ],
    },
    Question {
        id: 9,
        category: QuestionCategory::Ptsd,
        text: "Have you experienced nightmares or intrusive thoughts about a past event?",
        kind: QuestionKind::YesNo,
        options: &[
            AnswerOption { value: "no", label: "No" },
            AnswerOption { value: YES, label: "Yes" },
        ],
    },
    Question {
        id: 10,
        category: QuestionCategory::Safety,
        text: "Have you had thoughts that you would be better off not being here?",
        kind: QuestionKind::YesNo,
        options: &[
            AnswerOption { value: "no", label: "No" },
            AnswerOption { value: YES, label: "Yes, but I'm safe" },
        ],
    },
];

pub fn question(id: u32) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Selected option value per question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers(HashMap<u32, String>);

impl QuestionnaireAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, replacing any earlier answer to the same question.
    pub fn insert(&mut self, question_id: u32, value: impl Into<String>) {
        self.0.insert(question_id, value.into());
    }

    pub fn get(&self, question_id: u32) -> Option<&str> {
        self.0.get(&question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Catalogue questions without an answer, in catalogue order.
    pub fn missing(&self) -> Vec<u32> {
        QUESTIONS
            .iter()
            .filter(|q| !self.0.contains_key(&q.id))
            .map(|q| q.id)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

impl<V: Into<String>> FromIterator<(u32, V)> for QuestionnaireAnswers {
    fn from_iter<I: IntoIterator<Item = (u32, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Linear walk through [`QUESTIONS`].
#[derive(Debug, Clone, Default)]
pub struct Assessment {
    position: usize,
    answers: QuestionnaireAnswers,
}

impl Assessment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 == QUESTIONS.len()
    }

    /// Percentage of the questionnaire reached, counting the current question.
    pub fn progress(&self) -> f32 {
        (self.position + 1) as f32 / QUESTIONS.len() as f32 * 100.0
    }

    /// Answers the current question.
    pub fn answer(&mut self, value: &str) -> Result<(), AppError> {
        let question = self.current();
        if !question.accepts(value) {
            return Err(AppError::Validation(format!(
                "'{}' is not an option for question {}",
                value, question.id
            )));
        }
        debug!(question = question.id, value, "answer recorded");
        self.answers.insert(question.id, value);
        Ok(())
    }

    /// Moves forward; returns false when already on the last question.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Moves back; returns false when already on the first question.
    pub fn previous(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn answers(&self) -> &QuestionnaireAnswers {
        &self.answers
    }

    pub fn missing_questions(&self) -> Vec<u32> {
        self.answers.missing()
    }

    /// Finalizes the answers. Fails unless every question was answered.
    pub fn finish(self) -> Result<QuestionnaireAnswers, AppError> {
        let missing = self.answers.missing();
        if !missing.is_empty() {
            return Err(AppError::IncompleteAssessment(missing));
        }
        Ok(self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_shape() {
        assert_eq!(QUESTIONS.len(), 10);
        for (i, q) in QUESTIONS.iter().enumerate() {
            assert_eq!(q.id as usize, i + 1);
            assert!(!q.options.is_empty());
        }
        assert!(question(10).unwrap().accepts(YES));
        assert!(question(11).is_none());
    }

    #[test]
    fn test_answer_rejects_unknown_option() {
        let mut assessment = Assessment::new();
        assert!(matches!(assessment.answer("7"), Err(AppError::Validation(_))));
        assert!(assessment.answers().is_empty());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut assessment = Assessment::new();
        assert!(!assessment.previous());
        for _ in 0..9 {
            assert!(assessment.next());
        }
        assert!(assessment.is_last());
        assert!(!assessment.next());
        assert_eq!(assessment.progress(), 100.0);
    }

    #[test]
    fn test_finish_requires_every_answer() {
        let mut assessment = Assessment::new();
        assessment.answer("2").unwrap();
        match assessment.finish() {
            Err(AppError::IncompleteAssessment(missing)) => {
                assert_eq!(missing, (2..=10).collect::<Vec<u32>>());
            }
            other => panic!("expected incomplete assessment, got {:?}", other),
        }
    }

    #[test]
    fn test_reanswering_replaces_value() {
        let mut answers = QuestionnaireAnswers::new();
        answers.insert(1, "0");
        answers.insert(1, "3");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get(1), Some("3"));
    }
}
