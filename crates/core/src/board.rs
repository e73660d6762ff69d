// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Board configuration and column classification.
//!
//! Boards are identified by name, compared case-insensitively. A validated
//! [`BoardSet`] hands out [`BoardId`]s so the aggregation pass never has to
//! trust board names coming from the event stream.

use std::fmt;

use crate::error::{Error, Result};

/// Category of a board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    /// Work halted pending an external dependency.
    Blocked,
    /// Backlog or ready-for-work.
    Planned,
    Neither,
}

impl ColumnClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnClass::Blocked => "blocked",
            ColumnClass::Planned => "planned",
            ColumnClass::Neither => "neither",
        }
    }
}

impl fmt::Display for ColumnClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A case-insensitive set of names (labels or columns).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    folded: Vec<String>,
}

impl NameSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();
        folded.sort();
        folded.dedup();
        NameSet { folded }
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.folded.binary_search(&name).is_ok()
    }

    /// Returns true if any of the given names is in the set.
    pub fn contains_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.contains(n.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.folded.iter().map(String::as_str)
    }
}

/// Repository-wide bug and support label sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSets {
    pub bug: NameSet,
    pub support: NameSet,
}

impl LabelSets {
    pub fn new(bug: NameSet, support: NameSet) -> Self {
        LabelSets { bug, support }
    }
}

/// Column taxonomy and label overrides for one project board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Display name as configured.
    pub name: String,
    planned: NameSet,
    blocked: NameSet,
    bug_labels: Option<NameSet>,
    support_labels: Option<NameSet>,
}

impl BoardConfig {
    /// Creates a board with no planned or blocked columns.
    pub fn new(name: impl Into<String>) -> Self {
        BoardConfig {
            name: name.into(),
            planned: NameSet::default(),
            blocked: NameSet::default(),
            bug_labels: None,
            support_labels: None,
        }
    }

    /// Sets the planned columns (builder pattern).
    pub fn planned<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.planned = NameSet::new(columns);
        self
    }

    /// Sets the blocked columns (builder pattern).
    pub fn blocked<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked = NameSet::new(columns);
        self
    }

    /// Overrides the repository bug labels for this board (builder pattern).
    pub fn bug_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.bug_labels = Some(NameSet::new(labels));
        self
    }

    /// Overrides the repository support labels for this board (builder pattern).
    pub fn support_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.support_labels = Some(NameSet::new(labels));
        self
    }

    /// Classifies a column name. `Blocked` wins over `Planned`.
    pub fn classify(&self, column: &str) -> ColumnClass {
        if self.blocked.contains(column) {
            ColumnClass::Blocked
        } else if self.planned.contains(column) {
            ColumnClass::Planned
        } else {
            ColumnClass::Neither
        }
    }

    /// Bug labels in effect for this board.
    pub fn effective_bug_labels<'a>(&'a self, repo: &'a LabelSets) -> &'a NameSet {
        self.bug_labels.as_ref().unwrap_or(&repo.bug)
    }

    /// Support labels in effect for this board.
    pub fn effective_support_labels<'a>(&'a self, repo: &'a LabelSets) -> &'a NameSet {
        self.support_labels.as_ref().unwrap_or(&repo.support)
    }

    /// Checks the board name and that no column is both planned and blocked.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyBoardName);
        }
        if let Some(column) = self.planned.iter().find(|c| self.blocked.contains(c)) {
            return Err(Error::AmbiguousColumn {
                board: self.name.clone(),
                column: column.to_string(),
            });
        }
        Ok(())
    }
}

/// Handle to a board inside the [`BoardSet`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoardId(usize);

impl BoardId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The validated list of configured boards plus repository label sets.
#[derive(Debug, Clone, Default)]
pub struct BoardSet {
    boards: Vec<BoardConfig>,
    labels: LabelSets,
}

impl BoardSet {
    /// Validates every board and rejects duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBoardName`], [`Error::AmbiguousColumn`] or
    /// [`Error::DuplicateBoard`].
    pub fn new(boards: Vec<BoardConfig>, labels: LabelSets) -> Result<Self> {
        for (i, board) in boards.iter().enumerate() {
            board.validate()?;
            if boards[..i]
                .iter()
                .any(|b| crate::issue::names_match(&b.name, &board.name))
            {
                return Err(Error::DuplicateBoard(board.name.clone()));
            }
        }
        Ok(BoardSet { boards, labels })
    }

    /// Finds a board by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<BoardId> {
        self.boards
            .iter()
            .position(|b| crate::issue::names_match(&b.name, name))
            .map(BoardId)
    }

    pub fn get(&self, id: BoardId) -> Option<&BoardConfig> {
        self.boards.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoardId, &BoardConfig)> {
        self.boards.iter().enumerate().map(|(i, b)| (BoardId(i), b))
    }

    pub fn labels(&self) -> &LabelSets {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
