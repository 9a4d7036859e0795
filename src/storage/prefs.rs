/// Flat key-value namespace backed by SQLite
///
/// This is the persistence substrate for the whole crate: a single
/// `prefs` table mapping string keys to primitive values. Reads are
/// lenient - a missing key or a value of the wrong type comes back as
/// `None` and the caller substitutes a default. Writes are collected
/// into an `Edit` batch and applied in one transaction.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::StorageError;

/// Handle to the flat key-value namespace
pub struct Prefs {
    conn: Connection,
}

impl Prefs {
    /// Open (or create) the namespace at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| StorageError::Connection(format!("Failed to open store: {}", e)))?;

        Self::initialize(conn, Some(path.as_ref()))
    }

    /// Open a fresh in-memory namespace (tests, throwaway sessions)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open store: {}", e)))?;

        Self::initialize(conn, None)
    }

    fn initialize(conn: Connection, path: Option<&Path>) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value
            )",
            [],
        )?;

        match path {
            Some(path) => tracing::info!("Flat store initialized at: {:?}", path),
            None => tracing::info!("Flat store initialized in memory"),
        }

        Ok(Self { conn })
    }

    fn raw_value(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM prefs WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(value)
    }

    /// Read a string value; missing keys and non-text values are None
    pub fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw_value(key)?.and_then(|v| match v {
            Value::Text(s) => Some(s),
            _ => None,
        }))
    }

    /// Read a string value with a default
    pub fn get_string_or(&self, key: &str, default: &str) -> Result<String, StorageError> {
        Ok(self.get_string(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Read an integer value; text that parses as an integer also counts
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, StorageError> {
        Ok(self.raw_value(key)?.and_then(|v| match v {
            Value::Integer(i) => Some(i),
            Value::Text(s) => s.parse().ok(),
            _ => None,
        }))
    }

    /// Read an integer value with a default
    pub fn get_i64_or(&self, key: &str, default: i64) -> Result<i64, StorageError> {
        Ok(self.get_i64(key)?.unwrap_or(default))
    }

    /// Read a boolean value; stored as 0/1, "true"/"false" also accepted
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError> {
        Ok(self.raw_value(key)?.and_then(|v| match v {
            Value::Integer(i) => Some(i != 0),
            Value::Text(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }))
    }

    /// Read a boolean value with a default
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, StorageError> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> Result<bool, StorageError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM prefs WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Start an empty edit batch
    pub fn edit(&self) -> Edit {
        Edit::default()
    }

    /// Apply an edit batch in a single transaction
    ///
    /// Operations run in the order they were recorded, so a remove
    /// followed by a put of the same key leaves the put in place.
    pub fn apply(&mut self, edit: Edit) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;

        for op in edit.ops {
            match op {
                Op::Put(key, value) => {
                    tx.execute(
                        "INSERT OR REPLACE INTO prefs (key, value) VALUES (?1, ?2)",
                        params![key, value],
                    )?;
                }
                Op::Remove(key) => {
                    tx.execute("DELETE FROM prefs WHERE key = ?1", params![key])?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Remove every key in the namespace
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM prefs", [])?;
        Ok(())
    }
}

enum Op {
    Put(String, Value),
    Remove(String),
}

/// A batch of pending puts and removes
///
/// Mirrors the read side: strings, integers and booleans are the only
/// primitive types the namespace carries.
#[derive(Default)]
pub struct Edit {
    ops: Vec<Op>,
}

impl Edit {
    pub fn put_string(&mut self, key: &str, value: &str) -> &mut Self {
        self.ops
            .push(Op::Put(key.to_string(), Value::Text(value.to_string())));
        self
    }

    pub fn put_i64(&mut self, key: &str, value: i64) -> &mut Self {
        self.ops.push(Op::Put(key.to_string(), Value::Integer(value)));
        self
    }

    pub fn put_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.ops
            .push(Op::Put(key.to_string(), Value::Integer(i64::from(value))));
        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.ops.push(Op::Remove(key.to_string()));
        self
    }

    /// Number of pending operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
