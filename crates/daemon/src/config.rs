// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration.
//!
//! Configuration is a TOML file with a `[repository]` table, one
//! `[boards."Name"]` table per tracked board and optional `[database]`,
//! `[exporter]` and `[github]` tables.

use std::collections::BTreeMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use fg_core::{BoardConfig, BoardSet, LabelSets, NameSet};
use fg_github::{ClientConfig, RetryPolicy, DEFAULT_ENDPOINT, MAX_PAGE_SIZE};

use crate::error::{Error, Result};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// Seconds between passes when unset or non-positive.
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 30;

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
    #[serde(default)]
    pub github: GithubConfig,
    /// Board tables keyed by board display name.
    #[serde(default)]
    pub boards: BTreeMap<String, BoardTable>,
}

/// The tracked repository and its label taxonomy.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    pub owner: String,
    pub name: String,
    /// Seconds between passes; non-positive values fall back to the default.
    #[serde(default)]
    pub update_interval: i64,
    #[serde(default)]
    pub bug_labels: Vec<String>,
    #[serde(default)]
    pub support_labels: Vec<String>,
}

/// SQLite snapshot store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Relative paths resolve against the state directory.
    pub path: PathBuf,
}

/// Prometheus outputs: a node-exporter textfile and/or a scrape endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub textfile: Option<PathBuf>,
    /// Address serving `/metrics`, e.g. `0.0.0.0:8080`.
    pub listen: Option<SocketAddr>,
}

/// GitHub API tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_max_retries() -> u32 {
    RetryPolicy::default().max_retries
}

/// One `[boards."Name"]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardTable {
    #[serde(default)]
    pub planned_columns: Vec<String>,
    #[serde(default)]
    pub blocked_columns: Vec<String>,
    /// Overrides the repository bug labels for this board.
    pub bug_labels: Option<Vec<String>>,
    /// Overrides the repository support labels for this board.
    pub support_labels: Option<Vec<String>>,
}

impl Config {
    /// Loads configuration from the given file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ParseError::Toml(source) => Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
            ParseError::Invalid(msg) => Error::Config(msg),
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, ParseError> {
        let config: Config = toml::from_str(content).map_err(ParseError::Toml)?;
        if config.repository.owner.trim().is_empty() || config.repository.name.trim().is_empty() {
            return Err(ParseError::Invalid(
                "repository owner and name must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Builds the validated board set.
    ///
    /// # Errors
    ///
    /// Returns [`fg_core::Error::NoBoards`] when no board is configured, and
    /// any board validation error from [`BoardSet::new`].
    pub fn board_set(&self) -> Result<BoardSet> {
        if self.boards.is_empty() {
            return Err(fg_core::Error::NoBoards.into());
        }
        let labels = LabelSets::new(
            NameSet::new(&self.repository.bug_labels),
            NameSet::new(&self.repository.support_labels),
        );
        let boards = self
            .boards
            .iter()
            .map(|(name, table)| table.to_board(name))
            .collect();
        Ok(BoardSet::new(boards, labels)?)
    }

    pub fn update_interval(&self) -> Duration {
        match u64::try_from(self.repository.update_interval) {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => Duration::from_secs(DEFAULT_UPDATE_INTERVAL_SECS),
        }
    }

    /// Resolves the SQLite path, or `None` when no store is configured.
    pub fn database_path(&self, state_dir: &Path) -> Option<PathBuf> {
        self.database.as_ref().map(|db| {
            if db.path.is_absolute() {
                db.path.clone()
            } else {
                state_dir.join(&db.path)
            }
        })
    }

    /// Address for the `/metrics` endpoint, if one is configured.
    pub fn listen_addr(&self) -> Option<SocketAddr> {
        self.exporter.as_ref().and_then(|e| e.listen)
    }

    /// GitHub client settings for the configured repository.
    pub fn client_config(&self, token: String) -> ClientConfig {
        let mut client = ClientConfig::new(&self.repository.owner, &self.repository.name, token);
        client.endpoint = self.github.endpoint.clone();
        client.page_size = self.github.page_size;
        client.retry = RetryPolicy {
            max_retries: self.github.max_retries,
            ..RetryPolicy::default()
        };
        client
    }
}

impl BoardTable {
    fn to_board(&self, name: &str) -> BoardConfig {
        let mut board = BoardConfig::new(name)
            .planned(&self.planned_columns)
            .blocked(&self.blocked_columns);
        if let Some(labels) = &self.bug_labels {
            board = board.bug_labels(labels);
        }
        if let Some(labels) = &self.support_labels {
            board = board.support_labels(labels);
        }
        board
    }
}

#[derive(Debug)]
enum ParseError {
    Toml(toml::de::Error),
    Invalid(String),
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
