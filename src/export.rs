/// One-shot JSON export of the full data model
///
/// The export is a single JSON document with camelCase keys and
/// epoch-millisecond timestamps, built with serde rather than by hand.
/// It is a flattening of the current in-memory model for backup and
/// debugging, not a general interchange format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Habit, HabitProgress, HydrationIntake, HydrationSettings, MoodEntry};

/// Snapshot of every collection, ready to serialize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    pub habits: Vec<Habit>,
    pub habit_progress: Vec<HabitProgress>,
    pub mood_entries: Vec<MoodEntry>,
    pub hydration_settings: HydrationSettings,
    pub hydration_intake: Vec<HydrationIntake>,
    /// When this export was produced
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub export_date: DateTime<Utc>,
}
