// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Where a pass gets its issues from.

use std::future::Future;

use fg_core::Issue;

use crate::error::Result;

/// Produces the flattened issue list for one metrics pass.
///
/// Implemented by [`GithubClient`](crate::GithubClient) for live data and
/// [`FixtureSource`](crate::FixtureSource) for recorded data.
pub trait IssueSource {
    /// Short human-readable description used in logs.
    fn describe(&self) -> String;

    /// Fetches every issue. A partial result is never returned.
    fn fetch_issues(&self) -> impl Future<Output = Result<Vec<Issue>>> + Send;
}
