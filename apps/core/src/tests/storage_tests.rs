//! Storage Tests
//!
//! Mood log and intake persistence over the memory and file stores.

use crate::error::AppError;
use crate::models::{MoodEntry, MoodKind};
use crate::mood_log::MoodLog;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, MOOD_ENTRIES_KEY};
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use tempfile::tempdir;

fn entry(index: u32) -> MoodEntry {
    let mood = MoodKind::ALL[index as usize % MoodKind::ALL.len()];
    let mut entry = MoodEntry::new(mood, (index * 7 % 101) as u8, (index * 13 % 101) as u8, 6.5);
    entry.timestamp = Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap() + Duration::hours(index as i64);
    match index % 3 {
        0 => entry,
        1 => entry.with_notes(""),
        _ => entry.with_notes(format!("note {}", index)),
    }
}

#[cfg(test)]
mod mood_log_tests {
    use super::*;

    #[test]
    fn test_append_then_read_back_in_order() {
        let log = MoodLog::new(MemoryStore::new());
        let submitted: Vec<MoodEntry> = (0..12).map(entry).collect();

        for (i, e) in submitted.iter().enumerate() {
            assert_eq!(log.append(e.clone()).unwrap(), i + 1);
        }

        let stored = log.entries().unwrap();
        assert_eq!(stored, submitted);
        assert_eq!(stored[0].notes, None);
        assert_eq!(stored[1].notes.as_deref(), Some(""));
        assert_eq!(stored[2].notes.as_deref(), Some("note 2"));
    }

    #[test]
    fn test_stored_json_shape() {
        let store = Arc::new(MemoryStore::new());
        let log = MoodLog::new(store.clone());
        log.append(entry(0)).unwrap();
        log.append(entry(1)).unwrap();

        let raw = store.get(MOOD_ENTRIES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert!(array[0].get("notes").is_none());
        assert_eq!(array[1]["notes"], "");
        assert_eq!(array[0]["timestamp"], "2026-09-01T08:00:00Z");
        assert!(array[0].get("sleepHours").is_some());
    }

    #[test]
    fn test_file_backed_log_survives_reopen() {
        let dir = tempdir().expect("Failed to create temp dir");

        {
            let log = MoodLog::new(FileStore::new(dir.path()));
            for i in 0..4 {
                log.append(entry(i)).unwrap();
            }
        }

        let reopened = MoodLog::new(FileStore::new(dir.path()));
        let entries = reopened.entries().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries, (0..4).map(entry).collect::<Vec<_>>());
    }

    #[test]
    fn test_invalid_entry_leaves_log_unchanged() {
        let log = MoodLog::new(MemoryStore::new());
        log.append(entry(0)).unwrap();

        let mut bad = entry(1);
        bad.sleep_hours = -1.0;
        assert!(matches!(log.append(bad), Err(AppError::Validation(_))));
        assert_eq!(log.entries().unwrap().len(), 1);
    }
}
