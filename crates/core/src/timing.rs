// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lead time and cycle time of a single closed issue.

use chrono::{DateTime, TimeDelta, Utc};

use crate::board::{BoardConfig, ColumnClass};
use crate::issue::TimelineEvent;

/// Time from creation to closure.
pub fn lead_time(created_at: DateTime<Utc>, closed_at: DateTime<Utc>) -> TimeDelta {
    closed_at - created_at
}

/// Which piece of timeline evidence established the start of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStart {
    /// The issue was moved into a planned column.
    MovedToPlanned(DateTime<Utc>),
    /// The issue was added to the board without a planned move.
    AddedToBoard(DateTime<Utc>),
    /// No usable evidence; cycle time equals lead time.
    Created(DateTime<Utc>),
}

impl CycleStart {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            CycleStart::MovedToPlanned(at)
            | CycleStart::AddedToBoard(at)
            | CycleStart::Created(at) => *at,
        }
    }
}

/// Reconstructs when active work on `board` began.
///
/// Earliest move into a planned column before closure, else earliest
/// add-to-board before closure, else creation time. Events are not assumed
/// to be sorted.
pub fn cycle_start(
    events: &[TimelineEvent],
    created_at: DateTime<Utc>,
    closed_at: DateTime<Utc>,
    board: &BoardConfig,
) -> CycleStart {
    let on_board = move || {
        events
            .iter()
            .filter(move |e| e.is_on(&board.name) && e.at() < closed_at)
    };

    let moved = on_board()
        .filter(|e| match e {
            TimelineEvent::MovedColumn { to_column, .. } => {
                board.classify(to_column) == ColumnClass::Planned
            }
            TimelineEvent::AddedToBoard { .. } => false,
        })
        .map(TimelineEvent::at)
        .min();
    if let Some(at) = moved {
        return CycleStart::MovedToPlanned(at);
    }

    let added = on_board()
        .filter(|e| matches!(e, TimelineEvent::AddedToBoard { .. }))
        .map(TimelineEvent::at)
        .min();
    if let Some(at) = added {
        return CycleStart::AddedToBoard(at);
    }

    CycleStart::Created(created_at)
}

/// Time from the start of active work on `board` to closure.
pub fn cycle_time(
    events: &[TimelineEvent],
    created_at: DateTime<Utc>,
    closed_at: DateTime<Utc>,
    board: &BoardConfig,
) -> TimeDelta {
    closed_at - cycle_start(events, created_at, closed_at, board).at()
}

/// Converts a duration to fractional days.
pub fn as_days(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0 / 3600.0 / 24.0
}

#[cfg(test)]
#[path = "timing_tests.rs"]
mod tests;
