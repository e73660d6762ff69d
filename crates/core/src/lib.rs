// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fg-core: Flow-metrics engine for flowgauge
//!
//! This crate turns a flattened set of fetched issues into one immutable
//! [`MetricsSnapshot`] per pass: repository totals plus per-board counters
//! and average lead/cycle times. It also provides the SQLite snapshot store
//! and the Prometheus text rendering used by the flowgauged daemon.

pub mod aggregate;
pub mod assemble;
pub mod board;
pub mod db;
pub mod error;
pub mod exposition;
pub mod issue;
pub mod snapshot;
pub mod timing;

pub use aggregate::BoardMetrics;
pub use assemble::{assemble, Assembler};
pub use board::{BoardConfig, BoardId, BoardSet, ColumnClass, LabelSets, NameSet};
pub use db::Database;
pub use error::{Error, Result};
pub use issue::{BoardPlacement, Issue, IssueState, TimelineEvent};
pub use snapshot::{BoardSnapshot, MetricsSnapshot, RepoTotals};
pub use timing::{cycle_time, lead_time, CycleStart};
