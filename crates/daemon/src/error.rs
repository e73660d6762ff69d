// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// All possible errors that can occur in the daemon.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {}: {source}\n  hint: pass --config <path> or create ./config.toml", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("another flowgauged instance is already running\n  hint: lock held on {}", .0.display())]
    AlreadyRunning(PathBuf),

    #[error("failed to listen on {addr}: {source}\n  hint: change [exporter] listen or stop the process holding the port")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("sink '{sink}' failed: {message}")]
    Sink { sink: String, message: String },

    #[error(transparent)]
    Core(#[from] fg_core::Error),

    #[error(transparent)]
    Fetch(#[from] fg_github::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for daemon operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
