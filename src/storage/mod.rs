/// Storage layer for the flat key-value record store
///
/// This module persists every collection into a single flat key-value
/// namespace backed by SQLite: `prefs.rs` is the namespace itself,
/// `records.rs` is the indexed-key collection encoding on top of it, and
/// `store.rs` is the application-facing handle.

pub mod prefs;
pub mod records;
pub mod store;

// Re-export the main storage types
pub use prefs::{Edit, Prefs};
pub use store::WellnessStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
