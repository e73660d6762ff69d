// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::{Path, PathBuf};

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

const STATE_DIR_NAME: &str = "flowgauge";

/// Returns the value of `GITHUB_TOKEN` if set and non-empty.
pub fn github_token() -> Option<String> {
    std::env::var(vars::GITHUB_TOKEN)
        .ok()
        .filter(|t| !t.trim().is_empty())
}

/// Returns the value of `FLOWGAUGE_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    std::env::var(vars::FLOWGAUGE_STATE_DIR).ok().map(PathBuf::from)
}

/// Returns the value of `XDG_STATE_HOME` if set.
pub fn xdg_state_home() -> Option<PathBuf> {
    std::env::var(vars::XDG_STATE_HOME).ok().map(PathBuf::from)
}

/// Resolves the state directory: an explicit override, then
/// `FLOWGAUGE_STATE_DIR`, then `XDG_STATE_HOME/flowgauge`, then
/// `~/.local/state/flowgauge`.
pub fn resolve_state_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Some(dir) = state_dir() {
        return dir;
    }
    if let Some(dir) = xdg_state_home() {
        return dir.join(STATE_DIR_NAME);
    }
    dirs::home_dir()
        .map(|h| h.join(".local/state").join(STATE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".local/state").join(STATE_DIR_NAME))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
