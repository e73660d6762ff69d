// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue source backed by a JSON file on disk.
//!
//! The file holds either an array of issues in the fg-core JSON shape, or
//! an array of recorded GraphQL response pages.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use fg_core::Issue;

use crate::error::Result;
use crate::query::{GraphQlResponse, IssuesPage};
use crate::source::IssueSource;

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Issues(Vec<Issue>),
    Pages(Vec<GraphQlResponse>),
    Page(GraphQlResponse),
}

/// Reads issues from a fixture file instead of the GitHub API.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
    owner: String,
    name: String,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FixtureSource {
            path: path.into(),
            owner: "fixture".to_string(),
            name: "fixture".to_string(),
        }
    }

    /// Names the repository recorded pages belong to, for error messages.
    pub fn with_repository(mut self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.owner = owner.into();
        self.name = name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes fixture contents.
    pub fn parse(&self, contents: &str) -> Result<Vec<Issue>> {
        match serde_json::from_str(contents)? {
            FixtureFile::Issues(issues) => Ok(issues),
            FixtureFile::Pages(pages) => {
                let mut issues = Vec::new();
                for response in pages {
                    let page = IssuesPage::from_response(response, &self.owner, &self.name)?;
                    issues.extend(page.issues);
                }
                Ok(issues)
            }
            FixtureFile::Page(response) => {
                Ok(IssuesPage::from_response(response, &self.owner, &self.name)?.issues)
            }
        }
    }

    async fn load(&self) -> Result<Vec<Issue>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let issues = self.parse(&contents)?;
        tracing::debug!(path = %self.path.display(), issues = issues.len(), "loaded fixture");
        Ok(issues)
    }
}

impl IssueSource for FixtureSource {
    fn describe(&self) -> String {
        format!("fixture:{}", self.path.display())
    }

    fn fetch_issues(&self) -> impl Future<Output = Result<Vec<Issue>>> + Send {
        self.load()
    }
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
