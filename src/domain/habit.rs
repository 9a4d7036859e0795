/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a recurring
/// activity the user wants to track against a daily numeric target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{now_ms, DomainError, HabitId};

/// A habit the user wants to do regularly
///
/// Each habit has a name, an optional free-text description, and a daily
/// numeric target expressed in a unit string (see the UNIT_* consts for
/// the common ones).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read")
    pub name: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Daily numeric target, always at least 1
    pub target_value: u32,
    /// Unit for the target value (e.g., "times", "minutes")
    pub unit: String,
    /// When this habit was created
    #[serde(rename = "createdDate", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Whether this habit is currently active
    pub is_active: bool,
}

impl Habit {
    pub const UNIT_TIMES: &'static str = "times";
    pub const UNIT_MINUTES: &'static str = "minutes";
    pub const UNIT_HOURS: &'static str = "hours";
    pub const UNIT_GLASSES: &'static str = "glasses";
    pub const UNIT_STEPS: &'static str = "steps";
    pub const UNIT_PAGES: &'static str = "pages";
    pub const UNIT_KILOMETERS: &'static str = "km";

    /// Create a new habit with validation
    pub fn new(
        name: String,
        description: String,
        target_value: u32,
        unit: String,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Self::validate_target(target_value)?;
        Self::validate_unit(&unit)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            description,
            target_value,
            unit,
            created_at: now_ms(),
            is_active: true,
        })
    }

    /// Create a habit from existing data (used when loading from storage)
    ///
    /// This constructor assumes data is already validated and is mainly
    /// used by the storage layer.
    pub fn from_existing(
        id: HabitId,
        name: String,
        description: String,
        target_value: u32,
        unit: String,
        created_at: DateTime<Utc>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            name,
            description,
            target_value,
            unit,
            created_at,
            is_active,
        }
    }

    /// Update the habit's properties with validation
    pub fn update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        target_value: Option<u32>,
        unit: Option<String>,
        is_active: Option<bool>,
    ) -> Result<(), DomainError> {
        if let Some(ref new_name) = name {
            Self::validate_name(new_name)?;
        }
        if let Some(new_target) = target_value {
            Self::validate_target(new_target)?;
        }
        if let Some(ref new_unit) = unit {
            Self::validate_unit(new_unit)?;
        }

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_target) = target_value {
            self.target_value = new_target;
        }
        if let Some(new_unit) = unit {
            self.unit = new_unit;
        }
        if let Some(new_is_active) = is_active {
            self.is_active = new_is_active;
        }

        Ok(())
    }

    /// Get a display string for the target (e.g., "30 minutes")
    pub fn target_display(&self) -> String {
        format!("{} {}", self.target_value, self.unit)
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_target(target_value: u32) -> Result<(), DomainError> {
        if target_value == 0 {
            return Err(DomainError::InvalidValue {
                message: "Target value must be greater than 0".to_string(),
            });
        }
        if target_value > 10000 {
            return Err(DomainError::InvalidValue {
                message: "Target value cannot exceed 10000".to_string(),
            });
        }
        Ok(())
    }

    fn validate_unit(unit: &str) -> Result<(), DomainError> {
        let trimmed = unit.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidValue {
                message: "Unit cannot be empty".to_string(),
            });
        }
        if trimmed.len() > 20 {
            return Err(DomainError::InvalidValue {
                message: "Unit cannot be longer than 20 characters".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_habit() {
        let habit = Habit::new(
            "Morning Run".to_string(),
            "30-minute jog around the neighborhood".to_string(),
            30,
            Habit::UNIT_MINUTES.to_string(),
        );

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.name, "Morning Run");
        assert!(habit.is_active);
        assert_eq!(habit.target_display(), "30 minutes");
    }

    #[test]
    fn test_invalid_habit_name() {
        let result = Habit::new(
            "".to_string(), // Empty name should fail
            String::new(),
            1,
            Habit::UNIT_TIMES.to_string(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_target_value() {
        let result = Habit::new(
            "Test Habit".to_string(),
            String::new(),
            0, // Zero target should fail
            Habit::UNIT_TIMES.to_string(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_update_keeps_unchanged_fields() {
        let mut habit = Habit::new(
            "Read".to_string(),
            String::new(),
            20,
            Habit::UNIT_PAGES.to_string(),
        )
        .unwrap();

        habit
            .update(None, None, Some(40), None, Some(false))
            .unwrap();

        assert_eq!(habit.name, "Read");
        assert_eq!(habit.target_value, 40);
        assert!(!habit.is_active);
    }
}
