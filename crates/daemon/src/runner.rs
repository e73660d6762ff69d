// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The pass loop: fetch, assemble, publish.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use fg_core::{assemble, BoardSet, MetricsSnapshot};
use fg_github::IssueSource;

use crate::error::{Error, Result};
use crate::sink::{publish_all, SnapshotSink};

/// Outcome of one successful fetch and assembly.
#[derive(Debug)]
pub struct Pass {
    pub snapshot: MetricsSnapshot,
    /// Sinks that rejected the snapshot.
    pub sink_failures: Vec<Error>,
}

impl Pass {
    pub fn is_clean(&self) -> bool {
        self.sink_failures.is_empty()
    }
}

/// Owns everything a pass needs. Passes run one at a time.
pub struct Runner<S> {
    source: S,
    boards: BoardSet,
    sinks: Vec<Box<dyn SnapshotSink + Send>>,
}

impl<S: IssueSource> Runner<S> {
    pub fn new(source: S, boards: BoardSet, sinks: Vec<Box<dyn SnapshotSink + Send>>) -> Self {
        Runner {
            source,
            boards,
            sinks,
        }
    }

    /// Runs one pass. A fetch failure aborts the pass before anything is
    /// published; sink failures are collected and the remaining sinks still
    /// receive the snapshot.
    pub async fn run_pass(&mut self) -> Result<Pass> {
        let started = std::time::Instant::now();
        tracing::info!(source = %self.source.describe(), "pass starting");

        let issues = self.source.fetch_issues().await?;
        let snapshot = assemble(&issues, &self.boards, Utc::now());
        let sink_failures = publish_all(&mut self.sinks, &snapshot);

        tracing::info!(
            issues = issues.len(),
            open = snapshot.totals.open,
            closed = snapshot.totals.closed,
            boards = snapshot.boards.len(),
            failed_sinks = sink_failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pass finished"
        );
        Ok(Pass {
            snapshot,
            sink_failures,
        })
    }

    /// Runs a pass immediately and then once per `interval` until
    /// `shutdown` resolves. Ticks missed by a slow pass are skipped, and a
    /// pass still in flight at shutdown is dropped.
    pub async fn run_loop<F>(&mut self, interval: Duration, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut passes = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(passes, "shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    passes += 1;
                    tokio::select! {
                        _ = &mut shutdown => {
                            tracing::info!(passes, "shutdown requested, abandoning pass");
                            break;
                        }
                        result = self.run_pass() => {
                            if let Err(e) = result {
                                tracing::warn!("pass failed, waiting for next tick: {e}");
                            }
                        }
                    }
                }
            }
        }
        passes
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
