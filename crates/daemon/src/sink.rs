// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot sinks.
//!
//! Every pass publishes its snapshot to each configured sink in turn. A
//! failing sink does not stop the others.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fg_core::{exposition, Database, MetricsSnapshot};

use crate::error::{Error, Result};

/// Destination for finished snapshots.
pub trait SnapshotSink {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    fn publish(&mut self, snapshot: &MetricsSnapshot) -> Result<()>;
}

/// Appends snapshots to the SQLite store.
pub struct SqliteSink {
    db: Database,
}

impl SqliteSink {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(SqliteSink {
            db: Database::open(path)?,
        })
    }

    pub fn from_database(db: Database) -> Self {
        SqliteSink { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl SnapshotSink for SqliteSink {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn publish(&mut self, snapshot: &MetricsSnapshot) -> Result<()> {
        self.db.write_snapshot(snapshot)?;
        Ok(())
    }
}

/// Writes the Prometheus text rendering for a node-exporter textfile
/// collector. The file is replaced atomically.
pub struct TextfileSink {
    path: PathBuf,
}

impl TextfileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TextfileSink { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotSink for TextfileSink {
    fn name(&self) -> &str {
        "textfile"
    }

    fn publish(&mut self, snapshot: &MetricsSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp)?;
        write!(file, "{}", exposition::Exposition(snapshot))?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Prints each snapshot as JSON.
pub struct JsonSink<W> {
    out: W,
}

impl JsonSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        JsonSink {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        JsonSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SnapshotSink for JsonSink<W> {
    fn name(&self) -> &str {
        "json"
    }

    fn publish(&mut self, snapshot: &MetricsSnapshot) -> Result<()> {
        let json = snapshot.to_json()?;
        writeln!(self.out, "{json}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Publishes to every sink, logging failures. Returns the failures.
pub fn publish_all(sinks: &mut [Box<dyn SnapshotSink + Send>], snapshot: &MetricsSnapshot) -> Vec<Error> {
    let mut failures = Vec::new();
    for sink in sinks.iter_mut() {
        match sink.publish(snapshot) {
            Ok(()) => tracing::debug!(sink = sink.name(), "published snapshot"),
            Err(e) => {
                tracing::error!(sink = sink.name(), "failed to publish snapshot: {e}");
                failures.push(Error::Sink {
                    sink: sink.name().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }
    failures
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
