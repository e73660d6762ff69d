// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for metrics snapshots.
//!
//! Each snapshot becomes one row per counter, all sharing the snapshot's
//! timestamp, written inside a single transaction.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::snapshot::MetricsSnapshot;

/// SQL schema for the snapshot store.
pub const SCHEMA: &str = r#"
-- Repository-wide counters
CREATE TABLE IF NOT EXISTS repo_counter (
    ts TEXT NOT NULL,
    type TEXT NOT NULL,
    value INTEGER NOT NULL,
    PRIMARY KEY (ts, type)
);

-- Per-board counters
CREATE TABLE IF NOT EXISTS board_counter (
    ts TEXT NOT NULL,
    type TEXT NOT NULL,
    value INTEGER NOT NULL,
    board TEXT NOT NULL,
    PRIMARY KEY (ts, board, type)
);

-- Per-board flow averages in days (NULL when undefined)
CREATE TABLE IF NOT EXISTS board_flow (
    ts TEXT NOT NULL,
    type TEXT NOT NULL,
    value REAL,
    board TEXT NOT NULL,
    PRIMARY KEY (ts, board, type)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_repo_counter_ts ON repo_counter(ts);
CREATE INDEX IF NOT EXISTS idx_board_counter_board ON board_counter(board, ts);
CREATE INDEX IF NOT EXISTS idx_board_flow_board ON board_flow(board, ts);
"#;

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            Error::CorruptedData(format!("invalid timestamp '{value}' in column '{column}'"))
        })
}

/// Run schema creation and all migrations on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_rename_l3_counters(conn)?;
    Ok(())
}

/// Migration: Older stores named the support counter `OPEN_L3_BUG`.
fn migrate_rename_l3_counters(conn: &Connection) -> Result<()> {
    for table in ["repo_counter", "board_counter"] {
        let sql = format!("UPDATE {table} SET type = 'OPEN_SUPPORT' WHERE type = 'OPEN_L3_BUG'");
        conn.execute(&sql, [])?;
    }
    Ok(())
}

/// SQLite database connection holding snapshot history.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Write every counter and flow average of a snapshot.
    ///
    /// NaN averages are stored as NULL.
    pub fn write_snapshot(&mut self, snapshot: &MetricsSnapshot) -> Result<()> {
        let ts = snapshot.taken_at.to_rfc3339();
        let tx = self.conn.transaction()?;
        {
            let mut repo = tx.prepare("INSERT INTO repo_counter (ts, type, value) VALUES (?1, ?2, ?3)")?;
            for (kind, value) in snapshot.totals.counters() {
                repo.execute(params![ts, kind, value as i64])?;
            }

            let mut counter = tx.prepare(
                "INSERT INTO board_counter (ts, type, value, board) VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut flow = tx.prepare(
                "INSERT INTO board_flow (ts, type, value, board) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (board, metrics) in &snapshot.boards {
                for (kind, value) in metrics.counters() {
                    counter.execute(params![ts, kind, value as i64, board])?;
                }
                for (kind, value) in metrics.flow() {
                    let value = (!value.is_nan()).then_some(value);
                    flow.execute(params![ts, kind, value, board])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Timestamp of the most recent snapshot, if any.
    pub fn latest_snapshot_ts(&self) -> Result<Option<DateTime<Utc>>> {
        let ts: Option<String> = self
            .conn
            .query_row("SELECT MAX(ts) FROM repo_counter", [], |row| row.get(0))
            .optional()?
            .flatten();
        ts.map(|s| parse_timestamp(&s, "ts")).transpose()
    }

    /// Number of snapshots stored.
    pub fn snapshot_count(&self) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(DISTINCT ts) FROM repo_counter",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Repository counters recorded at `ts`, ordered by type.
    pub fn repo_counters_at(&self, ts: DateTime<Utc>) -> Result<Vec<(String, i64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT type, value FROM repo_counter WHERE ts = ?1 ORDER BY type")?;
        let rows = stmt
            .query_map(params![ts.to_rfc3339()], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Counters of one board recorded at `ts`, ordered by type.
    pub fn board_counters_at(&self, ts: DateTime<Utc>, board: &str) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT type, value FROM board_counter WHERE ts = ?1 AND board = ?2 ORDER BY type",
        )?;
        let rows = stmt
            .query_map(params![ts.to_rfc3339(), board], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Flow averages of one board recorded at `ts`, ordered by type.
    pub fn board_flow_at(
        &self,
        ts: DateTime<Utc>,
        board: &str,
    ) -> Result<Vec<(String, Option<f64>)>> {
        let mut stmt = self.conn.prepare(
            "SELECT type, value FROM board_flow WHERE ts = ?1 AND board = ?2 ORDER BY type",
        )?;
        let rows = stmt
            .query_map(params![ts.to_rfc3339(), board], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
