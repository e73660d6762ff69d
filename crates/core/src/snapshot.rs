// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The immutable result of one aggregation pass.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregate::BoardMetrics;
use crate::error::Result;
use crate::issue::names_match;

/// Repository-wide counters, independent of board membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoTotals {
    /// Every issue seen, whatever its state.
    pub all: u64,
    pub open: u64,
    pub closed: u64,
    pub open_bugs: u64,
    pub open_support: u64,
}

impl RepoTotals {
    /// Counter names and values, in storage order.
    pub fn counters(&self) -> [(&'static str, u64); 4] {
        [
            ("OPEN", self.open),
            ("CLOSED", self.closed),
            ("OPEN_BUG", self.open_bugs),
            ("OPEN_SUPPORT", self.open_support),
        ]
    }

    pub(crate) fn merge(&mut self, other: &RepoTotals) {
        self.all += other.all;
        self.open += other.open;
        self.closed += other.closed;
        self.open_bugs += other.open_bugs;
        self.open_support += other.open_support;
    }
}

/// Finalized metrics for one board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub open: u64,
    pub closed: u64,
    pub blocked: u64,
    pub planned: u64,
    pub open_bugs: u64,
    pub open_support: u64,
    /// NaN when the board has no closed issues (serialized as `null`).
    pub avg_lead_time_days: f64,
    /// NaN when the board has no closed issues (serialized as `null`).
    pub avg_cycle_time_days: f64,
}

impl BoardSnapshot {
    /// Counter names and values, in storage order.
    pub fn counters(&self) -> [(&'static str, u64); 6] {
        [
            ("OPEN", self.open),
            ("CLOSED", self.closed),
            ("BLOCKED", self.blocked),
            ("PLANNED", self.planned),
            ("OPEN_BUG", self.open_bugs),
            ("OPEN_SUPPORT", self.open_support),
        ]
    }

    /// Flow averages by name, in storage order.
    pub fn flow(&self) -> [(&'static str, f64); 2] {
        [
            ("LEAD_TIME", self.avg_lead_time_days),
            ("CYCLE_TIME", self.avg_cycle_time_days),
        ]
    }
}

impl From<&BoardMetrics> for BoardSnapshot {
    fn from(m: &BoardMetrics) -> Self {
        BoardSnapshot {
            open: m.open,
            closed: m.closed,
            blocked: m.blocked,
            planned: m.planned,
            open_bugs: m.open_bugs,
            open_support: m.open_support,
            avg_lead_time_days: m.average_lead_time_days(),
            avg_cycle_time_days: m.average_cycle_time_days(),
        }
    }
}

/// Repository totals plus one entry per configured board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub taken_at: DateTime<Utc>,
    pub totals: RepoTotals,
    /// Keyed by the board's configured display name.
    pub boards: BTreeMap<String, BoardSnapshot>,
}

impl MetricsSnapshot {
    /// Looks up a board by name, ignoring case.
    pub fn board(&self, name: &str) -> Option<&BoardSnapshot> {
        self.boards
            .iter()
            .find(|(k, _)| names_match(k, name))
            .map(|(_, v)| v)
    }

    /// Serializes the snapshot as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
