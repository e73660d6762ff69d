// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drives the per-board aggregation over a full issue set.
//!
//! An [`Assembler`] is accumulating until [`Assembler::finish`] consumes it
//! and returns the finalized [`MetricsSnapshot`].

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::aggregate::BoardMetrics;
use crate::board::{BoardId, BoardSet};
use crate::issue::{Issue, IssueState};
use crate::snapshot::{BoardSnapshot, MetricsSnapshot, RepoTotals};

/// Accumulates repository totals and one [`BoardMetrics`] per configured board.
#[derive(Debug, Clone)]
pub struct Assembler<'a> {
    boards: &'a BoardSet,
    totals: RepoTotals,
    metrics: Vec<BoardMetrics>,
}

impl<'a> Assembler<'a> {
    /// Starts an empty pass over the given boards.
    pub fn new(boards: &'a BoardSet) -> Self {
        Assembler {
            boards,
            totals: RepoTotals::default(),
            metrics: vec![BoardMetrics::default(); boards.len()],
        }
    }

    /// Folds one issue into the repository totals and every configured
    /// board it is placed on.
    pub fn push(&mut self, issue: &Issue) {
        let boards = self.boards;
        let labels = boards.labels();
        self.totals.all += 1;
        match issue.state {
            IssueState::Closed => self.totals.closed += 1,
            IssueState::Open => {
                self.totals.open += 1;
                if labels.bug.contains_any(&issue.labels) {
                    self.totals.open_bugs += 1;
                }
                if labels.support.contains_any(&issue.labels) {
                    self.totals.open_support += 1;
                }
            }
        }

        let mut seen: Vec<BoardId> = Vec::with_capacity(issue.placements.len());
        for placement in &issue.placements {
            let Some(id) = boards.lookup(&placement.board) else {
                tracing::trace!(issue = %issue.url, board = %placement.board, "skipping unconfigured board");
                continue;
            };
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);

            let (Some(board), Some(metrics)) =
                (boards.get(id), self.metrics.get_mut(id.index()))
            else {
                continue;
            };
            metrics.apply(issue, placement, board, labels);
        }
    }

    /// Folds every issue of an iterator.
    pub fn extend<'i, I>(&mut self, issues: I)
    where
        I: IntoIterator<Item = &'i Issue>,
    {
        for issue in issues {
            self.push(issue);
        }
    }

    /// Combines a partial pass over a disjoint slice of issues.
    pub fn merge(&mut self, other: Assembler<'a>) {
        self.totals.merge(&other.totals);
        for (mine, theirs) in self.metrics.iter_mut().zip(other.metrics.iter()) {
            mine.merge(theirs);
        }
    }

    /// Number of issues folded so far.
    pub fn issue_count(&self) -> u64 {
        self.totals.all
    }

    /// Computes averages and freezes the result.
    pub fn finish(self, taken_at: DateTime<Utc>) -> MetricsSnapshot {
        let boards: BTreeMap<String, BoardSnapshot> = self
            .boards
            .iter()
            .zip(self.metrics.iter())
            .map(|((_, board), metrics)| (board.name.clone(), BoardSnapshot::from(metrics)))
            .collect();

        tracing::debug!(
            issues = self.totals.all,
            boards = boards.len(),
            "snapshot assembled"
        );

        MetricsSnapshot {
            taken_at,
            totals: self.totals,
            boards,
        }
    }
}

/// Runs a complete pass over `issues` and returns the snapshot.
pub fn assemble<'i, I>(issues: I, boards: &BoardSet, taken_at: DateTime<Utc>) -> MetricsSnapshot
where
    I: IntoIterator<Item = &'i Issue>,
{
    let mut assembler = Assembler::new(boards);
    assembler.extend(issues);
    assembler.finish(taken_at)
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
