// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn flowgauged() -> Command {
    let mut cmd = cargo_bin_cmd!("flowgauged");
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG")
        .env_remove("FLOWGAUGE_STATE_DIR");
    cmd
}

/// Recorded issue set shared with the fg-core end-to-end tests.
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../core/tests/fixtures/issues.json")
}

pub const BOARDS: &str = r#"
[boards.Sprint]
planned_columns = ["Backlog", "Ready"]
blocked_columns = ["Blocked"]

[boards.Support]
planned_columns = ["Triage"]
blocked_columns = ["Waiting"]
support_labels = ["customer"]
"#;

/// Writes a config into `temp` and returns its path. `extra` is appended
/// after the `[repository]` table.
pub fn write_config(temp: &TempDir, extra: &str) -> PathBuf {
    let path = temp.path().join("config.toml");
    let content = format!(
        "[repository]\nowner = \"acme\"\nname = \"widgets\"\nbug_labels = [\"bug\"]\nsupport_labels = [\"L3\"]\n{extra}"
    );
    std::fs::write(&path, content).unwrap();
    path
}
