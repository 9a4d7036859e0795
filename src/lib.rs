/// Public library interface for the wellness tracker core
///
/// This crate holds the storage and domain layers of a personal-wellness
/// tracker: habits with per-day progress, a mood journal, hydration intake
/// and settings, and a single local user credential record. Everything
/// persists in one flat key-value namespace; the UI and platform layers
/// (screens, charts, notifications) live in the host application.

use std::path::PathBuf;

// Internal modules
mod auth;
mod domain;
mod export;
mod storage;

// Re-export public modules and types
pub use domain::*;
pub use export::DataExport;
pub use storage::{Edit, Prefs, StorageError, WellnessStore};

/// Pick a default on-disk location for the store file
///
/// Tries the user's home directory first, then the platform data directory,
/// then the current working directory. The first location that can be
/// created wins.
pub fn default_store_path() -> Result<PathBuf, std::io::Error> {
    let candidates = [
        dirs::home_dir().map(|mut p| {
            p.push(".wellness_tracker");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("wellness_tracker");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".wellness_tracker");
            p
        }),
    ];

    for dir in candidates.iter().flatten() {
        if std::fs::create_dir_all(dir).is_ok() {
            let mut path = dir.clone();
            path.push("wellness.db");
            return Ok(path);
        }
    }

    // Last resort: temporary directory
    let mut path = std::env::temp_dir();
    path.push("wellness_tracker");
    std::fs::create_dir_all(&path)?;
    path.push("wellness.db");

    tracing::warn!("Using temporary directory for store: {}", path.display());
    Ok(path)
}
