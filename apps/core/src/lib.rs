//! Campus wellness portal core.
//!
//! "The Brain" of the chat widget and intake questionnaire: a rule-based response
//! classifier with a crisis-first safety path, the intake scorer, and the best-effort
//! persistence of scores and mood check-ins behind an injected key-value store.

pub mod brain;
pub mod chat;
pub mod config;
pub mod error;
pub mod intake;
pub mod logging;
pub mod models;
pub mod mood_log;
pub mod storage;

#[cfg(test)]
mod tests;

pub use error::AppError;
