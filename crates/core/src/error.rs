// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for fg-core operations.

use thiserror::Error;

/// All possible errors that can occur in fg-core operations.
///
/// Aggregation itself never fails; these cover board validation and the
/// snapshot store.
#[derive(Debug, Error)]
pub enum Error {
    #[error("board name must not be empty")]
    EmptyBoardName,

    #[error("duplicate board: '{0}'\n  hint: board names are compared case-insensitively")]
    DuplicateBoard(String),

    #[error("column '{column}' on board '{board}' is listed as both planned and blocked\n  hint: a column may belong to at most one category")]
    AmbiguousColumn { board: String, column: String },

    #[error("no boards configured\n  hint: add at least one [boards.\"<name>\"] table")]
    NoBoards,

    #[error("invalid issue state: '{0}'\n  hint: valid states are: open, closed")]
    InvalidState(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for fg-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
