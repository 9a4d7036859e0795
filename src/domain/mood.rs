/// MoodEntry entity for the mood journal
///
/// A mood entry selects one of the fixed mood categories and carries an
/// optional free-text note. Entries are kept in reverse chronological
/// order; the derived date string groups them by local calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{local_date_of, now_ms, DomainError, EntryId, MoodType};

/// A timestamped mood journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Selected mood category
    pub mood: MoodType,
    /// Emoji shown for the entry, normally the mood's own
    pub emoji: String,
    /// Free-text note, may be empty
    pub notes: String,
    /// When this entry was logged
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Local calendar day of the timestamp
    pub date: NaiveDate,
}

impl MoodEntry {
    /// Create a new entry for the given mood, logged now
    pub fn new(mood: MoodType, notes: String) -> Result<Self, DomainError> {
        Self::validate_notes(&notes)?;

        let timestamp = now_ms();
        Ok(Self {
            id: EntryId::new(),
            mood,
            emoji: mood.emoji().to_string(),
            notes,
            timestamp,
            date: local_date_of(timestamp),
        })
    }

    /// Create an entry from existing data (used when loading from storage)
    pub fn from_existing(
        id: EntryId,
        mood: MoodType,
        emoji: String,
        notes: String,
        timestamp: DateTime<Utc>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            mood,
            emoji,
            notes,
            timestamp,
            date,
        }
    }

    /// Check if this entry has a non-blank note
    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }

    fn validate_notes(notes: &str) -> Result<(), DomainError> {
        if notes.len() > 500 {
            return Err(DomainError::InvalidValue {
                message: "Notes cannot be longer than 500 characters".to_string(),
            });
        }
        Ok(())
    }
}
