//! Companion pet state driven by the stored intake mood.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::IntakeMood;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetMood {
    Happy,
    Sad,
    Anxious,
    Calm,
    Sleepy,
}

/// Mood the companion reacts to.
///
/// The intake score only yields struggling/neutral/good; `Anxious` comes from screens
/// that pass an explicit anxiety signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMood {
    Intake(IntakeMood),
    Anxious,
}

impl From<IntakeMood> for UserMood {
    fn from(mood: IntakeMood) -> Self {
        UserMood::Intake(mood)
    }
}

const ENCOURAGEMENTS: [&str; 5] = [
    "You're stronger than you think!",
    "Take a deep breath. You've got this.",
    "Remember to be kind to yourself today.",
    "Small steps lead to big changes.",
    "Your feelings are valid and temporary.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub mood: PetMood,
    /// 0-100
    pub energy: u8,
    pub message: String,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            mood: PetMood::Calm,
            energy: 70,
            message: "Hi there! I'm here to support you.".to_string(),
        }
    }
}

impl PetState {
    /// State for a user mood. Neutral and unknown moods keep the calm default.
    pub fn for_user_mood(mood: Option<UserMood>) -> Self {
        match mood {
            Some(UserMood::Intake(IntakeMood::Struggling)) => Self {
                mood: PetMood::Sad,
                energy: 40,
                message: "I can sense you're having a tough time. Let's work through this together."
                    .to_string(),
            },
            Some(UserMood::Intake(IntakeMood::Good)) => Self {
                mood: PetMood::Happy,
                energy: 90,
                message: "You're doing great! Keep up the positive energy!".to_string(),
            },
            Some(UserMood::Anxious) => Self {
                mood: PetMood::Anxious,
                energy: 60,
                message: "I notice you're feeling anxious. Try some deep breaths with me."
                    .to_string(),
            },
            Some(UserMood::Intake(IntakeMood::Neutral)) | None => Self::default(),
        }
    }

    /// Number of lit bars on the five-bar energy meter.
    pub fn energy_bars(&self) -> u8 {
        (self.energy.min(100)) / 20
    }

    pub fn suggestions(&self) -> [&'static str; 2] {
        match self.mood {
            PetMood::Happy => ["Keep up the positive activities!", "Share your joy with others"],
            PetMood::Sad => ["Try a 5-minute walk outside", "Listen to uplifting music"],
            PetMood::Anxious => [
                "Practice breathing exercises",
                "Try progressive muscle relaxation",
            ],
            PetMood::Calm => ["Maintain your peaceful routine", "Continue mindfulness practice"],
            PetMood::Sleepy => ["Consider a short power nap", "Try light stretching"],
        }
    }

    /// Replace the message with a random encouragement, keeping mood and energy.
    pub fn encourage<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(message) = ENCOURAGEMENTS.choose(rng) {
            self.message = (*message).to_string();
        }
    }
}
