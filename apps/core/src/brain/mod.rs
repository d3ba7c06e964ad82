//! # Brain Module
//!
//! Deterministic, non-LLM analysis for the wellness portal.
//!
//! ## Components
//! - `responder`: ordered keyword rules that pick a chat reply (crisis first)
//! - `questionnaire`: the intake catalogue and assessment wizard
//! - `scoring`: intake sub-scores, mood classification and safety flag
//! - `companion`: companion pet state derived from the intake mood

pub mod companion;
pub mod questionnaire;
pub mod responder;
pub mod scoring;

pub use companion::{PetMood, PetState, UserMood};
pub use questionnaire::{Assessment, Question, QuestionnaireAnswers, QUESTIONS};
pub use responder::{
    AlertSink, Classification, ResponseCategory, ResponseClassifier, SafetyAlert,
    TracingAlertSink,
};
pub use scoring::IntakeScorer;
