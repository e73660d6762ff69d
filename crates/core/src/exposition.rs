// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Prometheus text exposition of a snapshot.
//!
//! All metrics are gauges. Undefined averages are written as `NaN`, which
//! the text format accepts.

use std::fmt;

use crate::snapshot::MetricsSnapshot;

/// Prefix shared by every exported metric name.
pub const METRIC_PREFIX: &str = "flowgauge";

/// Display adapter rendering a snapshot in the Prometheus text format.
pub struct Exposition<'a>(pub &'a MetricsSnapshot);

/// Renders a snapshot in the Prometheus text format.
pub fn render(snapshot: &MetricsSnapshot) -> String {
    Exposition(snapshot).to_string()
}

/// Escapes a label value (backslash, double quote, newline).
pub fn escape_label(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

fn header(f: &mut fmt::Formatter<'_>, name: &str, help: &str) -> fmt::Result {
    writeln!(f, "# HELP {METRIC_PREFIX}_{name} {help}")?;
    writeln!(f, "# TYPE {METRIC_PREFIX}_{name} gauge")
}

impl fmt::Display for Exposition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.0;
        let totals = &snap.totals;

        header(f, "issues", "Issues in the repository by state.")?;
        for (state, value) in [
            ("all", totals.all),
            ("open", totals.open),
            ("closed", totals.closed),
        ] {
            writeln!(f, "{METRIC_PREFIX}_issues{{state=\"{state}\"}} {value}")?;
        }

        header(f, "open_bugs", "Open issues carrying a bug label.")?;
        writeln!(f, "{METRIC_PREFIX}_open_bugs {}", totals.open_bugs)?;

        header(f, "open_support", "Open issues carrying a support label.")?;
        writeln!(f, "{METRIC_PREFIX}_open_support {}", totals.open_support)?;

        if snap.boards.is_empty() {
            return Ok(());
        }

        header(f, "board_issues", "Issues on a project board by category.")?;
        for (board, metrics) in &snap.boards {
            let board = escape_label(board);
            for (kind, value) in metrics.counters() {
                let category = kind.to_lowercase();
                writeln!(
                    f,
                    "{METRIC_PREFIX}_board_issues{{board=\"{board}\",category=\"{category}\"}} {value}"
                )?;
            }
        }

        header(
            f,
            "board_lead_time_days",
            "Average lead time of closed issues on a board, in days.",
        )?;
        for (board, metrics) in &snap.boards {
            writeln!(
                f,
                "{METRIC_PREFIX}_board_lead_time_days{{board=\"{}\"}} {}",
                escape_label(board),
                metrics.avg_lead_time_days
            )?;
        }

        header(
            f,
            "board_cycle_time_days",
            "Average cycle time of closed issues on a board, in days.",
        )?;
        for (board, metrics) in &snap.boards {
            writeln!(
                f,
                "{METRIC_PREFIX}_board_cycle_time_days{{board=\"{}\"}} {}",
                escape_label(board),
                metrics.avg_cycle_time_days
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "exposition_tests.rs"]
mod tests;
