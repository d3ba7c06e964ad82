//! Append-only mood check-in log, persisted as a JSON array under
//! [`MOOD_ENTRIES_KEY`](crate::storage::MOOD_ENTRIES_KEY).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::models::MoodEntry;
use crate::storage::{KeyValueStore, MOOD_ENTRIES_KEY};

/// Aggregates shown on the tracker screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub entries: usize,
    /// Average mood on the 1-5 scale, 0 when the log is empty
    pub average_mood: f32,
    pub average_energy: f32,
    pub average_sleep_hours: f32,
}

impl MoodSummary {
    pub fn label(&self) -> &'static str {
        if self.average_mood > 4.0 {
            "Great"
        } else if self.average_mood > 3.0 {
            "Good"
        } else if self.average_mood > 2.0 {
            "Okay"
        } else {
            "Low"
        }
    }
}

/// One point of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-based day index, oldest first
    pub day: usize,
    pub mood: u8,
    pub energy: u8,
    /// Inverted anxiety (100 - anxiety) so that higher is better on every line
    pub calm: u8,
}

pub struct MoodLog<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> MoodLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Entries in submission order.
    pub fn entries(&self) -> Result<Vec<MoodEntry>, AppError> {
        match self.store.get(MOOD_ENTRIES_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Validates and appends an entry. A log that cannot be decoded is left untouched.
    pub fn append(&self, entry: MoodEntry) -> Result<usize, AppError> {
        entry.check()?;

        let mut entries = self.entries()?;
        entries.push(entry);
        self.store
            .set(MOOD_ENTRIES_KEY, &serde_json::to_string(&entries)?)?;

        info!(total = entries.len(), "mood entry logged");
        Ok(entries.len())
    }

    pub fn summary(&self) -> Result<MoodSummary, AppError> {
        let entries = self.entries()?;
        if entries.is_empty() {
            return Ok(MoodSummary {
                entries: 0,
                average_mood: 0.0,
                average_energy: 0.0,
                average_sleep_hours: 0.0,
            });
        }

        let n = entries.len() as f32;
        let mood: f32 = entries.iter().map(|e| e.mood.value() as f32).sum();
        let energy: f32 = entries.iter().map(|e| e.energy as f32).sum();
        let sleep: f32 = entries.iter().map(|e| e.sleep_hours).sum();

        Ok(MoodSummary {
            entries: entries.len(),
            average_mood: mood / n,
            average_energy: energy / n,
            average_sleep_hours: sleep / n,
        })
    }

    /// The last `days` entries as chart points, oldest first.
    pub fn recent_trend(&self, days: usize) -> Result<Vec<TrendPoint>, AppError> {
        let entries = self.entries()?;
        let start = entries.len().saturating_sub(days);
        Ok(entries[start..]
            .iter()
            .enumerate()
            .map(|(i, e)| TrendPoint {
                day: i + 1,
                mood: e.mood.value(),
                energy: e.energy,
                calm: 100u8.saturating_sub(e.anxiety),
            })
            .collect())
    }
}
