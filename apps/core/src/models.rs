use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Represents a single message within a chat session.
///
/// Messages are immutable once created; a session only ever appends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The unique identifier for the message.
    pub id: Uuid,
    /// The text content of the message.
    pub text: String,
    /// The author of the message.
    pub sender: Sender,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message authored by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// Creates a message authored by the wellness bot.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Coarse mood derived from the intake sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeMood {
    Struggling,
    Neutral,
    Good,
}

impl IntakeMood {
    /// Returns the label stored alongside the score.
    pub fn label(&self) -> &'static str {
        match self {
            IntakeMood::Struggling => "struggling",
            IntakeMood::Neutral => "neutral",
            IntakeMood::Good => "good",
        }
    }
}

/// Result of scoring a completed intake questionnaire.
///
/// Stored as `{ depression, anxiety, mood, needsSupport, timestamp }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeScore {
    /// Sum of the depression item answers.
    #[serde(rename = "depression")]
    pub depression_score: u32,
    /// Sum of the anxiety item answers.
    #[serde(rename = "anxiety")]
    pub anxiety_score: u32,
    /// Mood classification derived from the two sub-scores.
    pub mood: IntakeMood,
    /// Set when the safety item was answered "yes", regardless of mood.
    #[serde(rename = "needsSupport")]
    pub needs_support: bool,
    /// When the score was computed.
    #[serde(rename = "timestamp")]
    pub computed_at: DateTime<Utc>,
}

/// The five moods offered by the daily check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoodKind {
    VerySad,
    Sad,
    Neutral,
    Happy,
    VeryHappy,
}

impl MoodKind {
    /// All moods, saddest first.
    pub const ALL: [MoodKind; 5] = [
        MoodKind::VerySad,
        MoodKind::Sad,
        MoodKind::Neutral,
        MoodKind::Happy,
        MoodKind::VeryHappy,
    ];

    /// Position on a 1-5 scale, used for averages and trend charts.
    pub fn value(&self) -> u8 {
        match self {
            MoodKind::VerySad => 1,
            MoodKind::Sad => 2,
            MoodKind::Neutral => 3,
            MoodKind::Happy => 4,
            MoodKind::VeryHappy => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodKind::VerySad => "Very Sad",
            MoodKind::Sad => "Sad",
            MoodKind::Neutral => "Neutral",
            MoodKind::Happy => "Happy",
            MoodKind::VeryHappy => "Very Happy",
        }
    }
}

/// One submission of the mood check-in form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub mood: MoodKind,
    /// Energy level in percent.
    #[validate(range(min = 0, max = 100))]
    pub energy: u8,
    /// Anxiety level in percent.
    #[validate(range(min = 0, max = 100))]
    pub anxiety: u8,
    /// Hours slept last night.
    #[validate(range(min = 0.0, max = 12.0))]
    #[serde(alias = "sleep")]
    pub sleep_hours: f32,
    /// Free-form notes. `None` is omitted from storage, `Some("")` is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(mood: MoodKind, energy: u8, anxiety: u8, sleep_hours: f32) -> Self {
        Self {
            mood,
            energy,
            anxiety,
            sleep_hours,
            notes: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Range validation plus a finiteness check on `sleep_hours`.
    ///
    /// The range rule alone accepts NaN, which `serde_json` would store as `null`.
    pub fn check(&self) -> Result<(), AppError> {
        if !self.sleep_hours.is_finite() {
            return Err(AppError::Validation(format!(
                "sleep_hours must be a finite number, got {}",
                self.sleep_hours
            )));
        }
        self.validate()?;
        Ok(())
    }
}
