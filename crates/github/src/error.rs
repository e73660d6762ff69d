// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for fetching issues.

use thiserror::Error;

/// All possible errors that can occur while fetching issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("github returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("graphql errors: {0}")]
    GraphQl(String),

    #[error("repository not found: {owner}/{name}\n  hint: check the owner and name, and that the token can read the repository")]
    RepositoryNotFound { owner: String, name: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("pagination did not advance past cursor '{0}'")]
    StuckCursor(String),

    #[error("missing github token\n  hint: export GITHUB_TOKEN with a token that can read the repository")]
    MissingToken,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for failures worth retrying within the same pass.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// A specialized Result type for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
