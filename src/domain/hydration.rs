/// Hydration tracking: settings, intake records and daily summaries
///
/// HydrationSettings is a singleton record holding the daily goal and the
/// reminder window; HydrationIntake is one logged drink. The reminder
/// computation here is pure - actually scheduling an OS alarm is the host
/// application's job.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{local_date_of, now_ms, DomainError, IntakeId};

/// Daily goal and reminder preferences for hydration tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationSettings {
    /// Daily intake goal in milliliters, kept within MIN_GOAL_ML..=MAX_GOAL_ML
    pub daily_goal_ml: u32,
    /// Whether reminder notifications are enabled
    pub reminder_enabled: bool,
    /// Minutes between reminders inside the active window
    pub reminder_interval_minutes: u32,
    /// Hour of day the reminder window opens (0-23)
    #[serde(rename = "startTime")]
    pub start_hour: u32,
    /// Minute precision for the window start
    pub start_minute: u32,
    /// Hour of day the reminder window closes (0-23)
    #[serde(rename = "endTime")]
    pub end_hour: u32,
    /// When these settings were last changed
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
}

impl HydrationSettings {
    pub const MIN_GOAL_ML: u32 = 500;
    pub const MAX_GOAL_ML: u32 = 5000;
    pub const DEFAULT_GOAL_ML: u32 = 2000;

    // Reminder intervals in minutes
    pub const INTERVAL_30_MIN: u32 = 30;
    pub const INTERVAL_1_HOUR: u32 = 60;
    pub const INTERVAL_2_HOURS: u32 = 120;
    pub const INTERVAL_3_HOURS: u32 = 180;
    pub const INTERVAL_4_HOURS: u32 = 240;

    /// Clamp a requested goal into the supported range
    pub fn clamped_goal(goal_ml: u32) -> u32 {
        goal_ml.clamp(Self::MIN_GOAL_ML, Self::MAX_GOAL_ML)
    }

    /// Next instant a reminder should fire, given the current local time
    ///
    /// Today at the window start, or tomorrow if that has already passed.
    /// None when reminders are disabled.
    pub fn next_reminder_from(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if !self.reminder_enabled {
            return None;
        }

        let start = now
            .date()
            .and_hms_opt(self.start_hour.min(23), self.start_minute.min(59), 0)?;

        if start < now {
            Some(start + Duration::days(1))
        } else {
            Some(start)
        }
    }
}

impl Default for HydrationSettings {
    fn default() -> Self {
        Self {
            daily_goal_ml: Self::DEFAULT_GOAL_ML,
            reminder_enabled: true,
            reminder_interval_minutes: Self::INTERVAL_1_HOUR,
            start_hour: 8,
            start_minute: 0,
            end_hour: 22,
            last_updated: now_ms(),
        }
    }
}

/// One logged drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationIntake {
    /// Unique identifier for this record
    pub id: IntakeId,
    /// Local calendar day the drink counts toward
    pub date: NaiveDate,
    /// Amount in milliliters, always positive
    pub amount_ml: u32,
    /// When the drink was logged
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Free-text note, may be empty
    pub note: String,
}

impl HydrationIntake {
    // Common serving sizes in ml
    pub const SMALL_GLASS: u32 = 200;
    pub const MEDIUM_GLASS: u32 = 250;
    pub const LARGE_GLASS: u32 = 300;
    pub const BOTTLE_SMALL: u32 = 330;
    pub const BOTTLE_MEDIUM: u32 = 500;
    pub const BOTTLE_LARGE: u32 = 750;

    /// Log a drink of the given amount now
    pub fn new(amount_ml: u32, note: String) -> Result<Self, DomainError> {
        if amount_ml == 0 {
            return Err(DomainError::InvalidValue {
                message: "Intake amount must be greater than 0".to_string(),
            });
        }

        let timestamp = now_ms();
        Ok(Self {
            id: IntakeId::new(),
            date: local_date_of(timestamp),
            amount_ml,
            timestamp,
            note,
        })
    }

    /// Create an intake record from existing data (used when loading
    /// from storage)
    pub fn from_existing(
        id: IntakeId,
        date: NaiveDate,
        amount_ml: u32,
        timestamp: DateTime<Utc>,
        note: String,
    ) -> Self {
        Self {
            id,
            date,
            amount_ml,
            timestamp,
            note,
        }
    }
}

/// Summary of one day's hydration against the goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHydration {
    pub date: NaiveDate,
    pub total_intake_ml: u32,
    pub goal_ml: u32,
    pub entries: Vec<HydrationIntake>,
    pub goal_reached: bool,
    /// Timestamp of the drink that crossed the goal, if any
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub goal_reached_time: Option<DateTime<Utc>>,
}

impl DailyHydration {
    /// Build a summary from one day's intake records
    pub fn summarize(date: NaiveDate, goal_ml: u32, entries: Vec<HydrationIntake>) -> Self {
        let total_intake_ml: u32 = entries.iter().map(|e| e.amount_ml).sum();

        // Walk the day in logged order to find when the goal was crossed
        let mut ordered: Vec<&HydrationIntake> = entries.iter().collect();
        ordered.sort_by_key(|e| e.timestamp);

        let mut running = 0u32;
        let mut goal_reached_time = None;
        for entry in ordered {
            running += entry.amount_ml;
            if goal_ml > 0 && running >= goal_ml {
                goal_reached_time = Some(entry.timestamp);
                break;
            }
        }

        Self {
            date,
            total_intake_ml,
            goal_ml,
            entries,
            goal_reached: goal_reached_time.is_some(),
            goal_reached_time,
        }
    }

    /// Percentage of the goal achieved, capped at 100
    pub fn progress_percentage(&self) -> u8 {
        if self.goal_ml == 0 {
            return 0;
        }
        let pct = (self.total_intake_ml as f32 / self.goal_ml as f32) * 100.0;
        pct.min(100.0) as u8
    }

    /// Milliliters still to drink today
    pub fn remaining_ml(&self) -> u32 {
        self.goal_ml.saturating_sub(self.total_intake_ml)
    }
}
