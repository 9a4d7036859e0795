/// HabitProgress entity for per-day habit tracking
///
/// This module defines the HabitProgress struct that records how much of a
/// habit's target was achieved on one calendar day. Identity is the
/// (habit_id, date) pair; there is at most one record per pair.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{now_ms, HabitId};

/// Achieved value and completion state for one habit on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitProgress {
    /// Which habit this record is for
    pub habit_id: HabitId,
    /// Which calendar day this record is for
    pub date: NaiveDate,
    /// Amount achieved so far on that day
    pub current_value: u32,
    /// Whether the daily target was reached
    pub is_completed: bool,
    /// When the target was reached, if it was
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub completion_time: Option<DateTime<Utc>>,
}

impl HabitProgress {
    /// Create an empty progress record for a habit and day
    pub fn new(habit_id: HabitId, date: NaiveDate) -> Self {
        Self {
            habit_id,
            date,
            current_value: 0,
            is_completed: false,
            completion_time: None,
        }
    }

    /// Create a progress record from existing data (used when loading
    /// from storage)
    pub fn from_existing(
        habit_id: HabitId,
        date: NaiveDate,
        current_value: u32,
        is_completed: bool,
        completion_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            habit_id,
            date,
            current_value,
            is_completed,
            completion_time,
        }
    }

    /// Mark the day completed at the habit's full target value
    pub fn completed(habit_id: HabitId, date: NaiveDate, target_value: u32) -> Self {
        Self {
            habit_id,
            date,
            current_value: target_value,
            is_completed: true,
            completion_time: Some(now_ms()),
        }
    }

    /// Clear the day back to untouched
    pub fn cleared(&self) -> Self {
        Self {
            habit_id: self.habit_id.clone(),
            date: self.date,
            current_value: 0,
            is_completed: false,
            completion_time: None,
        }
    }

    /// True when this record is for the given habit and day
    pub fn matches(&self, habit_id: &HabitId, date: NaiveDate) -> bool {
        &self.habit_id == habit_id && self.date == date
    }

    /// Percentage of the target achieved, capped at 100
    pub fn progress_percentage(&self, target_value: u32) -> u8 {
        if target_value == 0 {
            return 0;
        }
        let pct = (self.current_value as f32 / target_value as f32) * 100.0;
        pct.min(100.0) as u8
    }
}
