// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fg-github: Issue fetching for flowgauge
//!
//! Pages through a repository's issues over the GitHub GraphQL API and
//! converts them into fg-core [`Issue`](fg_core::Issue) values. A
//! file-backed [`FixtureSource`] serves the same data offline.

pub mod client;
pub mod error;
pub mod fixture;
pub mod query;
pub mod retry;
pub mod source;

pub use client::{collect_pages, ClientConfig, GithubClient, DEFAULT_ENDPOINT, MAX_PAGE_SIZE};
pub use error::{Error, Result};
pub use fixture::FixtureSource;
pub use query::IssuesPage;
pub use retry::RetryPolicy;
pub use source::IssueSource;
