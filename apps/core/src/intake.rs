//! Finishing the intake questionnaire: score, then persist on a best-effort basis.

use serde::Serialize;
use tracing::{info, warn};

use crate::brain::questionnaire::{Assessment, QuestionnaireAnswers};
use crate::brain::scoring::IntakeScorer;
use crate::error::AppError;
use crate::models::IntakeScore;
use crate::storage::{IntakeRepository, KeyValueStore};

/// Score of a finished assessment plus whether it reached storage.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeOutcome {
    pub score: IntakeScore,
    pub saved: bool,
    /// Why the score could not be saved, for a "could not save" notice
    pub save_error: Option<String>,
}

pub struct IntakeService<S: KeyValueStore> {
    scorer: IntakeScorer,
    repository: IntakeRepository<S>,
}

impl<S: KeyValueStore> IntakeService<S> {
    pub fn new(store: S) -> Self {
        Self {
            scorer: IntakeScorer::new(),
            repository: IntakeRepository::new(store),
        }
    }

    /// Scores and persists a complete assessment.
    ///
    /// Incomplete assessments are rejected and nothing is stored. A storage failure does
    /// not fail the call; the score is still returned.
    pub fn complete(&self, assessment: &Assessment) -> Result<IntakeOutcome, AppError> {
        let missing = assessment.missing_questions();
        if !missing.is_empty() {
            return Err(AppError::IncompleteAssessment(missing));
        }
        let score = self.scorer.score(assessment.answers());

        let outcome = match self.repository.save(&score) {
            Ok(()) => IntakeOutcome {
                score,
                saved: true,
                save_error: None,
            },
            Err(e) => {
                warn!("Could not save intake score: {}", e);
                IntakeOutcome {
                    score,
                    saved: false,
                    save_error: Some(e.to_string()),
                }
            }
        };

        if outcome.score.needs_support {
            info!("intake flagged for support follow-up");
        }
        Ok(outcome)
    }

    /// Scores whatever has been answered so far without storing it.
    pub fn score_partial(&self, answers: &QuestionnaireAnswers) -> IntakeScore {
        self.scorer.score(answers)
    }

    /// The most recently saved score, if any.
    pub fn latest(&self) -> Result<Option<IntakeScore>, AppError> {
        self.repository.load()
    }
}
