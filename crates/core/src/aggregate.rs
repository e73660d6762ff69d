// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-board running tallies.

use chrono::TimeDelta;

use crate::board::{BoardConfig, ColumnClass, LabelSets};
use crate::issue::{BoardPlacement, Issue, IssueState};
use crate::timing::{as_days, cycle_time, lead_time};

/// Counters and duration sums for one board during an aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardMetrics {
    pub open: u64,
    pub closed: u64,
    /// Open issues in a blocked column.
    pub blocked: u64,
    /// Open issues in a planned column.
    pub planned: u64,
    pub open_bugs: u64,
    pub open_support: u64,
    lead_sum: TimeDelta,
    cycle_sum: TimeDelta,
    samples: u64,
}

impl Default for BoardMetrics {
    fn default() -> Self {
        BoardMetrics {
            open: 0,
            closed: 0,
            blocked: 0,
            planned: 0,
            open_bugs: 0,
            open_support: 0,
            lead_sum: TimeDelta::zero(),
            cycle_sum: TimeDelta::zero(),
            samples: 0,
        }
    }
}

impl BoardMetrics {
    /// Folds one issue's placement on `board` into the tally.
    pub fn apply(
        &mut self,
        issue: &Issue,
        placement: &BoardPlacement,
        board: &BoardConfig,
        repo_labels: &LabelSets,
    ) {
        match issue.state {
            IssueState::Closed => {
                self.closed += 1;
                let Some(closed_at) = issue.closed_at else {
                    tracing::debug!(issue = %issue.url, board = %board.name, "closed issue without close time");
                    return;
                };
                let lead = lead_time(issue.created_at, closed_at);
                let cycle = cycle_time(&issue.timeline, issue.created_at, closed_at, board);
                tracing::debug!(
                    issue = %issue.url,
                    board = %board.name,
                    lead_days = as_days(lead),
                    cycle_days = as_days(cycle),
                    "closed issue"
                );
                self.lead_sum += lead;
                self.cycle_sum += cycle;
                self.samples += 1;
            }
            IssueState::Open => {
                self.open += 1;
                if board
                    .effective_bug_labels(repo_labels)
                    .contains_any(&issue.labels)
                {
                    self.open_bugs += 1;
                }
                if board
                    .effective_support_labels(repo_labels)
                    .contains_any(&issue.labels)
                {
                    self.open_support += 1;
                }
                match board.classify(&placement.column) {
                    ColumnClass::Blocked => self.blocked += 1,
                    ColumnClass::Planned => self.planned += 1,
                    ColumnClass::Neither => {}
                }
            }
        }
    }

    /// Adds another partial tally for the same board into this one.
    pub fn merge(&mut self, other: &BoardMetrics) {
        self.open += other.open;
        self.closed += other.closed;
        self.blocked += other.blocked;
        self.planned += other.planned;
        self.open_bugs += other.open_bugs;
        self.open_support += other.open_support;
        self.lead_sum += other.lead_sum;
        self.cycle_sum += other.cycle_sum;
        self.samples += other.samples;
    }

    /// Number of closed issues that contributed a duration.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Average lead time in days; NaN when nothing has closed.
    pub fn average_lead_time_days(&self) -> f64 {
        as_days(self.lead_sum) / self.samples as f64
    }

    /// Average cycle time in days; NaN when nothing has closed.
    pub fn average_cycle_time_days(&self) -> f64 {
        as_days(self.cycle_sum) / self.samples as f64
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
