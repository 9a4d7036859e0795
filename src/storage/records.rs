/// Synthetic collection encoding over the flat namespace
///
/// Ordered lists of records persist as a count key plus per-field indexed
/// keys: `<prefix>_<index>_<field>` and `<prefix>_count`. A save rewrites
/// the whole collection - it removes every indexed field up to the old
/// count, then writes a new count and re-indexes from 0, all in one batch.
/// A load walks 0..count-1, treats records with blank or unparseable
/// identity fields as absent, and defaults every other missing field.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    local_date_of, now_ms, EntryId, Habit, HabitId, HabitProgress, HydrationIntake, IntakeId,
    MoodEntry, MoodType,
};
use crate::storage::prefs::{Edit, Prefs};
use crate::storage::StorageError;

/// A record type that can live in the indexed-key encoding
pub trait FlatRecord: Sized {
    /// Key prefix for indexed entries (e.g. "habit" -> "habit_0_name")
    const PREFIX: &'static str;
    /// Key holding the number of indexed entries
    const COUNT_KEY: &'static str;
    /// Every field suffix a record writes; saves remove exactly these
    const FIELDS: &'static [&'static str];

    /// Write this record's fields under the given indexed prefix
    fn encode(&self, edit: &mut Edit, prefix: &str);

    /// Read a record from the given indexed prefix
    ///
    /// Ok(None) means the slot is treated as absent (blank identity).
    fn decode(prefs: &Prefs, prefix: &str) -> Result<Option<Self>, StorageError>;
}

/// Number of indexed slots currently recorded for a collection
pub fn record_count<R: FlatRecord>(prefs: &Prefs) -> Result<usize, StorageError> {
    Ok(prefs.get_i64_or(R::COUNT_KEY, 0)?.max(0) as usize)
}

/// Load a collection by walking its indexed slots
pub fn load_records<R: FlatRecord>(prefs: &Prefs) -> Result<Vec<R>, StorageError> {
    let count = record_count::<R>(prefs)?;
    let mut records = Vec::with_capacity(count);

    for index in 0..count {
        let prefix = format!("{}_{}", R::PREFIX, index);
        if let Some(record) = R::decode(prefs, &prefix)? {
            records.push(record);
        }
    }

    Ok(records)
}

/// Replace a collection's persisted representation wholesale
pub fn save_records<R: FlatRecord>(prefs: &mut Prefs, records: &[R]) -> Result<(), StorageError> {
    let old_count = record_count::<R>(prefs)?;

    let mut edit = prefs.edit();
    edit.remove(R::COUNT_KEY);
    for index in 0..old_count {
        for field in R::FIELDS {
            edit.remove(&format!("{}_{}_{}", R::PREFIX, index, field));
        }
    }

    edit.put_i64(R::COUNT_KEY, records.len() as i64);
    for (index, record) in records.iter().enumerate() {
        record.encode(&mut edit, &format!("{}_{}", R::PREFIX, index));
    }

    prefs.apply(edit)?;
    tracing::debug!("Rewrote {} '{}' records", records.len(), R::PREFIX);
    Ok(())
}

// Field encoding helpers shared by the record impls

fn field(prefix: &str, name: &str) -> String {
    format!("{}_{}", prefix, name)
}

fn date_to_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn timestamp_or_now(ms: Option<i64>) -> DateTime<Utc> {
    ms.and_then(DateTime::from_timestamp_millis).unwrap_or_else(now_ms)
}

fn u32_or(value: Option<i64>, default: u32) -> u32 {
    value
        .map(|v| u32::try_from(v).unwrap_or(default))
        .unwrap_or(default)
}

impl FlatRecord for Habit {
    const PREFIX: &'static str = "habit";
    const COUNT_KEY: &'static str = "habits_count";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "targetValue",
        "unit",
        "createdDate",
        "isActive",
    ];

    fn encode(&self, edit: &mut Edit, prefix: &str) {
        edit.put_string(&field(prefix, "id"), &self.id.to_string())
            .put_string(&field(prefix, "name"), &self.name)
            .put_string(&field(prefix, "description"), &self.description)
            .put_i64(&field(prefix, "targetValue"), self.target_value as i64)
            .put_string(&field(prefix, "unit"), &self.unit)
            .put_i64(&field(prefix, "createdDate"), self.created_at.timestamp_millis())
            .put_bool(&field(prefix, "isActive"), self.is_active);
    }

    fn decode(prefs: &Prefs, prefix: &str) -> Result<Option<Self>, StorageError> {
        let id = match prefs.get_string(&field(prefix, "id"))? {
            Some(s) => match HabitId::from_string(&s) {
                Ok(id) => id,
                Err(_) => return Ok(None),
            },
            None => return Ok(None),
        };

        let name = prefs.get_string_or(&field(prefix, "name"), "")?;
        let description = prefs.get_string_or(&field(prefix, "description"), "")?;
        let target_value = u32_or(prefs.get_i64(&field(prefix, "targetValue"))?, 1);
        let unit = prefs.get_string_or(&field(prefix, "unit"), Habit::UNIT_TIMES)?;
        let created_at = timestamp_or_now(prefs.get_i64(&field(prefix, "createdDate"))?);
        let is_active = prefs.get_bool_or(&field(prefix, "isActive"), true)?;

        Ok(Some(Habit::from_existing(
            id,
            name,
            description,
            target_value,
            unit,
            created_at,
            is_active,
        )))
    }
}

impl FlatRecord for HabitProgress {
    const PREFIX: &'static str = "habit_progress";
    const COUNT_KEY: &'static str = "habit_progress_count";
    const FIELDS: &'static [&'static str] = &[
        "habitId",
        "date",
        "currentValue",
        "isCompleted",
        "completionTime",
    ];

    fn encode(&self, edit: &mut Edit, prefix: &str) {
        edit.put_string(&field(prefix, "habitId"), &self.habit_id.to_string())
            .put_string(&field(prefix, "date"), &date_to_str(self.date))
            .put_i64(&field(prefix, "currentValue"), self.current_value as i64)
            .put_bool(&field(prefix, "isCompleted"), self.is_completed);
        // Absent key encodes None; the save already cleared the old slot
        if let Some(completion_time) = self.completion_time {
            edit.put_i64(
                &field(prefix, "completionTime"),
                completion_time.timestamp_millis(),
            );
        }
    }

    fn decode(prefs: &Prefs, prefix: &str) -> Result<Option<Self>, StorageError> {
        // Identity is the (habitId, date) pair; both must decode
        let habit_id = match prefs.get_string(&field(prefix, "habitId"))? {
            Some(s) => match HabitId::from_string(&s) {
                Ok(id) => id,
                Err(_) => return Ok(None),
            },
            None => return Ok(None),
        };
        let date = match prefs.get_string(&field(prefix, "date"))? {
            Some(s) => match parse_date(&s) {
                Some(date) => date,
                None => return Ok(None),
            },
            None => return Ok(None),
        };

        let current_value = u32_or(prefs.get_i64(&field(prefix, "currentValue"))?, 0);
        let is_completed = prefs.get_bool_or(&field(prefix, "isCompleted"), false)?;
        let completion_time = prefs
            .get_i64(&field(prefix, "completionTime"))?
            .filter(|&ms| ms >= 0)
            .and_then(DateTime::from_timestamp_millis);

        Ok(Some(HabitProgress::from_existing(
            habit_id,
            date,
            current_value,
            is_completed,
            completion_time,
        )))
    }
}

impl FlatRecord for MoodEntry {
    const PREFIX: &'static str = "mood_entry";
    const COUNT_KEY: &'static str = "mood_entries_count";
    const FIELDS: &'static [&'static str] =
        &["id", "moodType", "emoji", "notes", "timestamp", "date"];

    fn encode(&self, edit: &mut Edit, prefix: &str) {
        edit.put_string(&field(prefix, "id"), &self.id.to_string())
            .put_string(&field(prefix, "moodType"), self.mood.name())
            .put_string(&field(prefix, "emoji"), &self.emoji)
            .put_string(&field(prefix, "notes"), &self.notes)
            .put_i64(&field(prefix, "timestamp"), self.timestamp.timestamp_millis())
            .put_string(&field(prefix, "date"), &date_to_str(self.date));
    }

    fn decode(prefs: &Prefs, prefix: &str) -> Result<Option<Self>, StorageError> {
        let id = match prefs.get_string(&field(prefix, "id"))? {
            Some(s) => match EntryId::from_string(&s) {
                Ok(id) => id,
                Err(_) => return Ok(None),
            },
            None => return Ok(None),
        };

        // Unknown mood names fall back to the neutral category
        let mood = prefs
            .get_string(&field(prefix, "moodType"))?
            .and_then(|s| MoodType::from_name(&s))
            .unwrap_or(MoodType::Neutral);
        let emoji = prefs.get_string_or(&field(prefix, "emoji"), mood.emoji())?;
        let notes = prefs.get_string_or(&field(prefix, "notes"), "")?;
        let timestamp = timestamp_or_now(prefs.get_i64(&field(prefix, "timestamp"))?);
        let date = prefs
            .get_string(&field(prefix, "date"))?
            .and_then(|s| parse_date(&s))
            .unwrap_or_else(|| local_date_of(timestamp));

        Ok(Some(MoodEntry::from_existing(
            id, mood, emoji, notes, timestamp, date,
        )))
    }
}

impl FlatRecord for HydrationIntake {
    const PREFIX: &'static str = "hydration_intake";
    const COUNT_KEY: &'static str = "hydration_intake_count";
    const FIELDS: &'static [&'static str] = &["id", "date", "amountMl", "timestamp", "note"];

    fn encode(&self, edit: &mut Edit, prefix: &str) {
        edit.put_string(&field(prefix, "id"), &self.id.to_string())
            .put_string(&field(prefix, "date"), &date_to_str(self.date))
            .put_i64(&field(prefix, "amountMl"), self.amount_ml as i64)
            .put_i64(&field(prefix, "timestamp"), self.timestamp.timestamp_millis())
            .put_string(&field(prefix, "note"), &self.note);
    }

    fn decode(prefs: &Prefs, prefix: &str) -> Result<Option<Self>, StorageError> {
        // Identity is the (id, date) pair; both must decode
        let id = match prefs.get_string(&field(prefix, "id"))? {
            Some(s) => match IntakeId::from_string(&s) {
                Ok(id) => id,
                Err(_) => return Ok(None),
            },
            None => return Ok(None),
        };
        let date = match prefs.get_string(&field(prefix, "date"))? {
            Some(s) => match parse_date(&s) {
                Some(date) => date,
                None => return Ok(None),
            },
            None => return Ok(None),
        };

        let amount_ml = u32_or(prefs.get_i64(&field(prefix, "amountMl"))?, 0);
        let timestamp = timestamp_or_now(prefs.get_i64(&field(prefix, "timestamp"))?);
        let note = prefs.get_string_or(&field(prefix, "note"), "")?;

        Ok(Some(HydrationIntake::from_existing(
            id, date, amount_ml, timestamp, note,
        )))
    }
}
