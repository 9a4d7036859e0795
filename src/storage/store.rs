/// Application-facing store handle
///
/// WellnessStore owns the flat namespace and exposes every operation the
/// host application needs: collection upserts and deletes, the hydration
/// settings singleton, app flags, the local user credential record,
/// streaks/statistics and the JSON export. The handle is constructed by
/// the composition root and passed down explicitly; there is no global
/// instance.

use std::path::Path;

use chrono::NaiveDate;

use crate::auth::PasswordHash;
use crate::domain::{
    now_ms, today_local, DailyHydration, EntryId, Habit, HabitId, HabitProgress, HabitStats,
    HydrationIntake, HydrationSettings, HydrationStats, MoodEntry, MoodStats,
};
use crate::domain::stats;
use crate::export::DataExport;
use crate::storage::prefs::Prefs;
use crate::storage::records::{load_records, save_records};
use crate::storage::StorageError;

// App flag and credential keys
const KEY_FIRST_LAUNCH: &str = "first_launch";
const KEY_LAST_BACKUP: &str = "last_backup";
const KEY_IS_LOGGED_IN: &str = "is_logged_in";
const KEY_USER_NAME: &str = "user_name";
const KEY_USER_EMAIL: &str = "user_email";
const KEY_USER_PASSWORD_HASH: &str = "user_password_hash";

// Hydration settings singleton keys
const KEY_HYDRATION_GOAL: &str = "hydration_dailyGoalMl";
const KEY_HYDRATION_REMINDER_ENABLED: &str = "hydration_reminderEnabled";
const KEY_HYDRATION_REMINDER_INTERVAL: &str = "hydration_reminderIntervalMinutes";
const KEY_HYDRATION_START_HOUR: &str = "hydration_startTime";
const KEY_HYDRATION_END_HOUR: &str = "hydration_endTime";
const KEY_HYDRATION_START_MINUTE: &str = "hydration_startMinute";
const KEY_HYDRATION_LAST_UPDATED: &str = "hydration_lastUpdated";

/// The store handle
pub struct WellnessStore {
    prefs: Prefs,
}

impl WellnessStore {
    /// Open (or create) a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self {
            prefs: Prefs::open(path)?,
        })
    }

    /// Open an in-memory store (tests, throwaway sessions)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            prefs: Prefs::open_in_memory()?,
        })
    }

    /// Wrap an already-open namespace
    pub fn from_prefs(prefs: Prefs) -> Self {
        Self { prefs }
    }

    /// Direct read access to the underlying namespace (useful for testing)
    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    /// Direct write access to the underlying namespace (useful for testing)
    pub fn prefs_mut(&mut self) -> &mut Prefs {
        &mut self.prefs
    }

    // HABIT MANAGEMENT

    /// All habits in stored order
    pub fn habits(&self) -> Result<Vec<Habit>, StorageError> {
        load_records(&self.prefs)
    }

    /// Replace the whole habit collection
    pub fn save_habits(&mut self, habits: &[Habit]) -> Result<(), StorageError> {
        save_records(&mut self.prefs, habits)
    }

    /// Look up one habit by id
    pub fn habit(&self, habit_id: &HabitId) -> Result<Option<Habit>, StorageError> {
        Ok(self.habits()?.into_iter().find(|h| &h.id == habit_id))
    }

    /// Insert or update a habit, matched by id
    pub fn save_habit(&mut self, habit: &Habit) -> Result<(), StorageError> {
        let mut habits = self.habits()?;
        match habits.iter_mut().find(|h| h.id == habit.id) {
            Some(existing) => *existing = habit.clone(),
            None => habits.push(habit.clone()),
        }
        self.save_habits(&habits)?;

        tracing::debug!("Saved habit: {} ({})", habit.name, habit.id.to_string());
        Ok(())
    }

    /// Delete a habit and all of its progress records
    pub fn delete_habit(&mut self, habit_id: &HabitId) -> Result<(), StorageError> {
        let mut habits = self.habits()?;
        habits.retain(|h| &h.id != habit_id);
        self.save_habits(&habits)?;

        let mut progress = self.habit_progress()?;
        progress.retain(|p| &p.habit_id != habit_id);
        save_records(&mut self.prefs, &progress)?;

        tracing::debug!("Deleted habit: {}", habit_id.to_string());
        Ok(())
    }

    // HABIT PROGRESS MANAGEMENT

    /// All progress records in stored order
    pub fn habit_progress(&self) -> Result<Vec<HabitProgress>, StorageError> {
        load_records(&self.prefs)
    }

    /// Insert or update the progress record for its (habit, day) pair
    pub fn save_progress_for_day(&mut self, progress: &HabitProgress) -> Result<(), StorageError> {
        let mut records = self.habit_progress()?;
        match records
            .iter_mut()
            .find(|p| p.matches(&progress.habit_id, progress.date))
        {
            Some(existing) => *existing = progress.clone(),
            None => records.push(progress.clone()),
        }
        save_records(&mut self.prefs, &records)
    }

    /// Progress for one habit on one day, if recorded
    pub fn progress_for_day(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitProgress>, StorageError> {
        Ok(self
            .habit_progress()?
            .into_iter()
            .find(|p| p.matches(habit_id, date)))
    }

    /// Progress for one habit today, if recorded
    pub fn today_progress(&self, habit_id: &HabitId) -> Result<Option<HabitProgress>, StorageError> {
        self.progress_for_day(habit_id, today_local())
    }

    // MOOD MANAGEMENT

    /// All mood entries, newest first
    pub fn mood_entries(&self) -> Result<Vec<MoodEntry>, StorageError> {
        let mut entries: Vec<MoodEntry> = load_records(&self.prefs)?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Insert or update a mood entry; new entries go to the head
    pub fn save_mood_entry(&mut self, entry: &MoodEntry) -> Result<(), StorageError> {
        let mut entries = self.mood_entries()?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => entries.insert(0, entry.clone()),
        }
        save_records(&mut self.prefs, &entries)
    }

    /// Delete a mood entry by id
    pub fn delete_mood_entry(&mut self, entry_id: &EntryId) -> Result<(), StorageError> {
        let mut entries = self.mood_entries()?;
        entries.retain(|e| &e.id != entry_id);
        save_records(&mut self.prefs, &entries)
    }

    /// Mood entries logged today, newest first
    pub fn today_mood_entries(&self) -> Result<Vec<MoodEntry>, StorageError> {
        let today = today_local();
        Ok(self
            .mood_entries()?
            .into_iter()
            .filter(|e| e.date == today)
            .collect())
    }

    // HYDRATION MANAGEMENT

    /// The hydration settings singleton, defaults when nothing is stored
    pub fn hydration_settings(&self) -> Result<HydrationSettings, StorageError> {
        let defaults = HydrationSettings::default();
        Ok(HydrationSettings {
            daily_goal_ml: self
                .prefs
                .get_i64(KEY_HYDRATION_GOAL)?
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(HydrationSettings::DEFAULT_GOAL_ML),
            reminder_enabled: self.prefs.get_bool_or(KEY_HYDRATION_REMINDER_ENABLED, true)?,
            reminder_interval_minutes: self
                .prefs
                .get_i64(KEY_HYDRATION_REMINDER_INTERVAL)?
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(HydrationSettings::INTERVAL_1_HOUR),
            start_hour: self
                .prefs
                .get_i64(KEY_HYDRATION_START_HOUR)?
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.start_hour),
            start_minute: self
                .prefs
                .get_i64(KEY_HYDRATION_START_MINUTE)?
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.start_minute),
            end_hour: self
                .prefs
                .get_i64(KEY_HYDRATION_END_HOUR)?
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.end_hour),
            last_updated: self
                .prefs
                .get_i64(KEY_HYDRATION_LAST_UPDATED)?
                .and_then(chrono::DateTime::from_timestamp_millis)
                .unwrap_or_else(now_ms),
        })
    }

    /// Save the hydration settings singleton
    ///
    /// The daily goal is clamped into the supported range and the
    /// last-updated stamp is refreshed.
    pub fn save_hydration_settings(
        &mut self,
        settings: &HydrationSettings,
    ) -> Result<(), StorageError> {
        let goal = HydrationSettings::clamped_goal(settings.daily_goal_ml);

        let mut edit = self.prefs.edit();
        edit.put_i64(KEY_HYDRATION_GOAL, goal as i64)
            .put_bool(KEY_HYDRATION_REMINDER_ENABLED, settings.reminder_enabled)
            .put_i64(
                KEY_HYDRATION_REMINDER_INTERVAL,
                settings.reminder_interval_minutes as i64,
            )
            .put_i64(KEY_HYDRATION_START_HOUR, settings.start_hour as i64)
            .put_i64(KEY_HYDRATION_START_MINUTE, settings.start_minute as i64)
            .put_i64(KEY_HYDRATION_END_HOUR, settings.end_hour as i64)
            .put_i64(KEY_HYDRATION_LAST_UPDATED, now_ms().timestamp_millis());
        self.prefs.apply(edit)?;

        tracing::debug!("Saved hydration settings, goal {}ml", goal);
        Ok(())
    }

    /// All intake records, newest first
    pub fn hydration_intake(&self) -> Result<Vec<HydrationIntake>, StorageError> {
        let mut intake: Vec<HydrationIntake> = load_records(&self.prefs)?;
        intake.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(intake)
    }

    /// Log a drink; the record goes to the head of the list
    pub fn add_hydration_intake(&mut self, intake: &HydrationIntake) -> Result<(), StorageError> {
        let mut records = self.hydration_intake()?;
        records.insert(0, intake.clone());
        save_records(&mut self.prefs, &records)
    }

    /// Intake records for today, newest first
    pub fn today_hydration_intake(&self) -> Result<Vec<HydrationIntake>, StorageError> {
        let today = today_local();
        Ok(self
            .hydration_intake()?
            .into_iter()
            .filter(|i| i.date == today)
            .collect())
    }

    /// Total milliliters logged today
    pub fn today_total_hydration(&self) -> Result<u32, StorageError> {
        Ok(self
            .today_hydration_intake()?
            .iter()
            .map(|i| i.amount_ml)
            .sum())
    }

    /// Summary of one day's intake against the current goal
    pub fn daily_hydration(&self, date: NaiveDate) -> Result<DailyHydration, StorageError> {
        let goal_ml = self.hydration_settings()?.daily_goal_ml;
        let entries = self
            .hydration_intake()?
            .into_iter()
            .filter(|i| i.date == date)
            .collect();
        Ok(DailyHydration::summarize(date, goal_ml, entries))
    }

    // STREAKS AND STATISTICS

    /// Consecutive completed days for a habit, ending today
    pub fn habit_streak(&self, habit_id: &HabitId) -> Result<u32, StorageError> {
        let progress = self.habit_progress()?;
        Ok(stats::habit_streak(habit_id, &progress, today_local()))
    }

    /// Full statistics for one habit
    pub fn habit_stats(&self, habit: &Habit) -> Result<HabitStats, StorageError> {
        let progress = self.habit_progress()?;
        Ok(HabitStats::calculate(habit, &progress, today_local()))
    }

    /// Statistics over the whole mood journal
    pub fn mood_stats(&self) -> Result<MoodStats, StorageError> {
        let entries = self.mood_entries()?;
        Ok(MoodStats::calculate(&entries))
    }

    /// Statistics over all hydration tracking
    pub fn hydration_stats(&self) -> Result<HydrationStats, StorageError> {
        let goal_ml = self.hydration_settings()?.daily_goal_ml;
        let intake = self.hydration_intake()?;
        Ok(HydrationStats::calculate(&intake, goal_ml, today_local()))
    }

    // APP SETTINGS

    pub fn is_first_launch(&self) -> Result<bool, StorageError> {
        self.prefs.get_bool_or(KEY_FIRST_LAUNCH, true)
    }

    pub fn set_first_launch(&mut self, is_first: bool) -> Result<(), StorageError> {
        let mut edit = self.prefs.edit();
        edit.put_bool(KEY_FIRST_LAUNCH, is_first);
        self.prefs.apply(edit)
    }

    /// Epoch milliseconds of the last backup, 0 when never backed up
    pub fn last_backup_time(&self) -> Result<i64, StorageError> {
        self.prefs.get_i64_or(KEY_LAST_BACKUP, 0)
    }

    pub fn set_last_backup_time(&mut self, timestamp_ms: i64) -> Result<(), StorageError> {
        let mut edit = self.prefs.edit();
        edit.put_i64(KEY_LAST_BACKUP, timestamp_ms);
        self.prefs.apply(edit)
    }

    pub fn is_logged_in(&self) -> Result<bool, StorageError> {
        self.prefs.get_bool_or(KEY_IS_LOGGED_IN, false)
    }

    pub fn set_logged_in(&mut self, logged_in: bool) -> Result<(), StorageError> {
        let mut edit = self.prefs.edit();
        edit.put_bool(KEY_IS_LOGGED_IN, logged_in);
        self.prefs.apply(edit)
    }

    // AUTH MANAGEMENT

    /// True when a credential record exists
    pub fn is_registered(&self) -> Result<bool, StorageError> {
        let email = self.prefs.get_string(KEY_USER_EMAIL)?;
        let hash = self.prefs.get_string(KEY_USER_PASSWORD_HASH)?;
        Ok(matches!((email, hash), (Some(e), Some(h)) if !e.is_empty() && !h.is_empty()))
    }

    /// The registered email, if any
    pub fn registered_email(&self) -> Result<Option<String>, StorageError> {
        Ok(self.prefs.get_string(KEY_USER_EMAIL)?.filter(|e| !e.is_empty()))
    }

    /// Register the local user
    ///
    /// Returns false when the same email (case-insensitive) is already
    /// registered; a different email replaces the credential record.
    pub fn register_user(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, StorageError> {
        if let Some(existing) = self.registered_email()? {
            if existing.to_lowercase() == email.to_lowercase() {
                return Ok(false);
            }
        }

        let hash = PasswordHash::create(password);
        let mut edit = self.prefs.edit();
        edit.put_string(KEY_USER_NAME, name)
            .put_string(KEY_USER_EMAIL, email)
            .put_string(KEY_USER_PASSWORD_HASH, &hash.to_storage());
        self.prefs.apply(edit)?;

        tracing::debug!("Registered user");
        Ok(true)
    }

    /// Check a login attempt against the stored credential record
    pub fn validate_login(&self, email: &str, password: &str) -> Result<bool, StorageError> {
        let stored_email = match self.registered_email()? {
            Some(e) => e,
            None => return Ok(false),
        };
        if stored_email.to_lowercase() != email.to_lowercase() {
            return Ok(false);
        }

        let stored_hash = match self.prefs.get_string(KEY_USER_PASSWORD_HASH)? {
            Some(h) => h,
            None => return Ok(false),
        };

        Ok(PasswordHash::parse(&stored_hash)
            .map(|h| h.verify(password))
            .unwrap_or(false))
    }

    /// Remove the credential record
    pub fn clear_user(&mut self) -> Result<(), StorageError> {
        let mut edit = self.prefs.edit();
        edit.remove(KEY_USER_NAME)
            .remove(KEY_USER_EMAIL)
            .remove(KEY_USER_PASSWORD_HASH);
        self.prefs.apply(edit)
    }

    // UTILITY METHODS

    /// Export every collection into one JSON document
    pub fn export_json(&self) -> Result<String, StorageError> {
        let export = DataExport {
            habits: self.habits()?,
            habit_progress: self.habit_progress()?,
            mood_entries: self.mood_entries()?,
            hydration_settings: self.hydration_settings()?,
            hydration_intake: self.hydration_intake()?,
            export_date: now_ms(),
        };
        Ok(serde_json::to_string(&export)?)
    }

    /// Wipe the whole namespace
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        self.prefs.clear()?;
        tracing::debug!("Cleared all stored data");
        Ok(())
    }
}
