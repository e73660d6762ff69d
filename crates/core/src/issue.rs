// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue types consumed by the metrics engine.
//!
//! This module contains the fetched shape of an issue: Issue, IssueState,
//! BoardPlacement and TimelineEvent. Values are immutable once fetched and
//! deserialize from the same camelCase JSON the fetch layer and fixtures use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Compares two names ignoring case, without allocating.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Open/closed state as reported by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueState {
    #[serde(alias = "open")]
    Open,
    #[serde(alias = "closed")]
    Closed,
}

impl IssueState {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "OPEN",
            IssueState::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(IssueState::Open),
            "closed" => Ok(IssueState::Closed),
            _ => Err(Error::InvalidState(s.to_string())),
        }
    }
}

/// Where an issue currently sits on one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPlacement {
    /// Name of the project board.
    pub board: String,
    /// Name of the column the issue's card is in.
    pub column: String,
}

impl BoardPlacement {
    pub fn new(board: impl Into<String>, column: impl Into<String>) -> Self {
        BoardPlacement {
            board: board.into(),
            column: column.into(),
        }
    }
}

/// A board-movement entry from an issue's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TimelineEvent {
    /// The issue's card was put on a board.
    AddedToBoard { board: String, at: DateTime<Utc> },
    /// The issue's card moved between two columns of a board.
    MovedColumn {
        board: String,
        #[serde(default)]
        from_column: String,
        to_column: String,
        at: DateTime<Utc>,
    },
}

impl TimelineEvent {
    /// The board this event happened on.
    pub fn board(&self) -> &str {
        match self {
            TimelineEvent::AddedToBoard { board, .. } | TimelineEvent::MovedColumn { board, .. } => {
                board
            }
        }
    }

    /// When the event happened.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            TimelineEvent::AddedToBoard { at, .. } | TimelineEvent::MovedColumn { at, .. } => *at,
        }
    }

    /// Returns true if the event belongs to the named board (case-insensitive).
    pub fn is_on(&self, board: &str) -> bool {
        names_match(self.board(), board)
    }
}

/// One tracked issue together with its board placements and timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Canonical URL of the issue.
    pub url: String,
    pub title: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    /// Only meaningful when the issue is closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub placements: Vec<BoardPlacement>,
    /// Board-movement events, ordered by occurrence.
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl Issue {
    /// Creates an open issue with no labels, placements or timeline.
    pub fn new(url: impl Into<String>, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Issue {
            url: url.into(),
            title: title.into(),
            state: IssueState::Open,
            created_at,
            closed_at: None,
            labels: Vec::new(),
            placements: Vec::new(),
            timeline: Vec::new(),
        }
    }

    /// Marks the issue closed at the given time (builder pattern).
    pub fn closed(mut self, closed_at: DateTime<Utc>) -> Self {
        self.state = IssueState::Closed;
        self.closed_at = Some(closed_at);
        self
    }

    /// Adds a label (builder pattern).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Places the issue on a board column (builder pattern).
    pub fn on_board(mut self, board: impl Into<String>, column: impl Into<String>) -> Self {
        self.placements.push(BoardPlacement::new(board, column));
        self
    }

    /// Appends a timeline event (builder pattern).
    pub fn with_event(mut self, event: TimelineEvent) -> Self {
        self.timeline.push(event);
        self
    }

    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
