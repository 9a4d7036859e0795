/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier newtypes and the MoodType enum that
/// are used by Habit, HabitProgress, MoodEntry and HydrationIntake.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't
/// accidentally pass a habit ID where a mood entry ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful when loading from storage)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Convert to string representation
    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// Unique identifier for a mood journal entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entry ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Convert to string representation
    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// Unique identifier for a hydration intake record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntakeId(pub Uuid);

impl IntakeId {
    /// Generate a new random intake ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an intake ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Convert to string representation
    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// The fixed set of mood categories for journal entries
///
/// Each mood carries a numeric intensity (1-5), a display label and an
/// emoji. Unknown names read back from storage fall back to Neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoodType {
    VeryHappy,
    Happy,
    Neutral,
    Sad,
    VerySad,
    Angry,
    Excited,
    Calm,
    Anxious,
    Tired,
}

impl MoodType {
    /// Numeric intensity of this mood, 1 (worst) to 5 (best)
    pub fn intensity(&self) -> u8 {
        match self {
            MoodType::VeryHappy => 5,
            MoodType::Happy => 4,
            MoodType::Neutral => 3,
            MoodType::Sad => 2,
            MoodType::VerySad => 1,
            MoodType::Angry => 2,
            MoodType::Excited => 5,
            MoodType::Calm => 4,
            MoodType::Anxious => 2,
            MoodType::Tired => 2,
        }
    }

    /// Get the display label for this mood
    pub fn label(&self) -> &'static str {
        match self {
            MoodType::VeryHappy => "Very Happy",
            MoodType::Happy => "Happy",
            MoodType::Neutral => "Neutral",
            MoodType::Sad => "Sad",
            MoodType::VerySad => "Very Sad",
            MoodType::Angry => "Angry",
            MoodType::Excited => "Excited",
            MoodType::Calm => "Calm",
            MoodType::Anxious => "Anxious",
            MoodType::Tired => "Tired",
        }
    }

    /// Get the emoji shown for this mood
    pub fn emoji(&self) -> &'static str {
        match self {
            MoodType::VeryHappy => "😄",
            MoodType::Happy => "😊",
            MoodType::Neutral => "😐",
            MoodType::Sad => "😢",
            MoodType::VerySad => "😭",
            MoodType::Angry => "😠",
            MoodType::Excited => "🤩",
            MoodType::Calm => "😌",
            MoodType::Anxious => "😰",
            MoodType::Tired => "😴",
        }
    }

    /// Stable name used in the persisted representation
    pub fn name(&self) -> &'static str {
        match self {
            MoodType::VeryHappy => "VERY_HAPPY",
            MoodType::Happy => "HAPPY",
            MoodType::Neutral => "NEUTRAL",
            MoodType::Sad => "SAD",
            MoodType::VerySad => "VERY_SAD",
            MoodType::Angry => "ANGRY",
            MoodType::Excited => "EXCITED",
            MoodType::Calm => "CALM",
            MoodType::Anxious => "ANXIOUS",
            MoodType::Tired => "TIRED",
        }
    }

    /// Look up a mood by its persisted name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all_by_intensity()
            .iter()
            .copied()
            .find(|m| m.name() == name)
    }

    /// Look up a mood by intensity, Neutral when nothing matches
    pub fn from_intensity(value: u8) -> Self {
        Self::all_by_intensity()
            .iter()
            .copied()
            .find(|m| m.intensity() == value)
            .unwrap_or(MoodType::Neutral)
    }

    /// All moods in selector display order
    pub fn all() -> [MoodType; 10] {
        [
            MoodType::VeryHappy,
            MoodType::Happy,
            MoodType::Excited,
            MoodType::Calm,
            MoodType::Neutral,
            MoodType::Tired,
            MoodType::Anxious,
            MoodType::Sad,
            MoodType::Angry,
            MoodType::VerySad,
        ]
    }

    // Declaration order, used for intensity lookup so VERY_HAPPY wins
    // over EXCITED and SAD over ANGRY/ANXIOUS/TIRED at equal values.
    fn all_by_intensity() -> [MoodType; 10] {
        [
            MoodType::VeryHappy,
            MoodType::Happy,
            MoodType::Neutral,
            MoodType::Sad,
            MoodType::VerySad,
            MoodType::Angry,
            MoodType::Excited,
            MoodType::Calm,
            MoodType::Anxious,
            MoodType::Tired,
        ]
    }
}

/// Current time clamped to millisecond precision
///
/// Timestamps persist as epoch milliseconds, so in-memory values are kept
/// at the same precision and survive a save/load round trip unchanged.
pub(crate) fn now_ms() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Today's calendar date in the device's local timezone
pub(crate) fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Local calendar date of a UTC timestamp
pub(crate) fn local_date_of(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}
