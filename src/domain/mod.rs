/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, HabitProgress, MoodEntry,
/// HydrationIntake, HydrationSettings) and their validation rules, plus the
/// derived statistics types computed from them.

pub mod habit;
pub mod hydration;
pub mod mood;
pub mod progress;
pub mod stats;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use hydration::*;
pub use mood::*;
pub use progress::*;
pub use stats::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
