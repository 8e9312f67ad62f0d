//! SQLite-based persistence.
//!
//! Provides durable storage for:
//! - The append-only flow history (one row per completed focus cycle)
//! - The cumulative completed-cycle counter
//! - A key-value store for application state (timer snapshot, task list,
//!   mood, arbitrary shell state)

use rusqlite::{params, Connection};

use crate::error::DatabaseError;
use crate::flow::FlowRecord;

const COMPLETED_CYCLES_KEY: &str = "completed_cycles";

/// SQLite database for flow history and key-value state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/vibesync/vibesync.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = super::data_dir()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
            .join("vibesync.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open the database at an explicit path (used by integration tests
    /// and portable installs).
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl Into<std::path::PathBuf>) -> Result<Self, DatabaseError> {
        let path = path.into();
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS flow_history (
                    id           INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp_ms INTEGER NOT NULL,
                    score        INTEGER NOT NULL
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_flow_history_timestamp
                    ON flow_history(timestamp_ms);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Append one flow record. Records are never updated or deleted.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn append_flow(&self, record: &FlowRecord) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO flow_history (timestamp_ms, score) VALUES (?1, ?2)",
            params![record.timestamp_ms, record.score],
        )?;
        Ok(())
    }

    /// The full flow history in append (chronological) order.
    pub fn flow_history(&self) -> Result<Vec<FlowRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT timestamp_ms, score FROM flow_history ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(FlowRecord {
                timestamp_ms: row.get(0)?,
                score: row.get(1)?,
            })
        })?;
        let mut history = Vec::new();
        for row in rows {
            history.push(row?);
        }
        Ok(history)
    }

    /// All-time flow score.
    pub fn total_flow_score(&self) -> Result<i64, DatabaseError> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(score), 0) FROM flow_history",
            [],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(total)
    }

    /// Cumulative completed focus cycles across the install's lifetime.
    /// Independent of the session cycle counter, which resets with the
    /// session.
    pub fn completed_cycles(&self) -> Result<u64, DatabaseError> {
        match self.kv_get(COMPLETED_CYCLES_KEY)? {
            Some(value) => value
                .parse()
                .map_err(|_| DatabaseError::CorruptValue {
                    key: COMPLETED_CYCLES_KEY.into(),
                    message: format!("expected integer, got '{value}'"),
                }),
            None => Ok(0),
        }
    }

    /// Increment the completed-cycle counter and return the new count.
    ///
    /// # Errors
    /// Returns an error if the stored value is corrupt or the write fails.
    pub fn increment_completed_cycles(&self) -> Result<u64, DatabaseError> {
        let next = self.completed_cycles()? + 1;
        self.kv_set(COMPLETED_CYCLES_KEY, &next.to_string())?;
        Ok(next)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
