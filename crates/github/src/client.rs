// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub GraphQL client.
//!
//! Fetches every issue of one repository, following the issues
//! connection's cursor until the last page.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use fg_core::Issue;

use crate::error::{Error, Result};
use crate::query::{request_body, IssuesPage};
use crate::retry::RetryPolicy;
use crate::source::IssueSource;

/// Default GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
/// Largest page the issues connection accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

const USER_AGENT: &str = concat!("flowgauge/", env!("CARGO_PKG_VERSION"));
/// Project-card timeline fields are only served under this preview.
const PREVIEW_ACCEPT: &str = "application/vnd.github.starfox-preview+json";

/// Which repository to fetch and how.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub owner: String,
    pub name: String,
    pub token: String,
    pub endpoint: String,
    pub page_size: u32,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, token: impl Into<String>) -> Self {
        ClientConfig {
            owner: owner.into(),
            name: name.into(),
            token: token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: MAX_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

/// Real GitHub API client that makes HTTP requests.
pub struct GithubClient {
    http: Client,
    config: ClientConfig,
}

impl GithubClient {
    /// Builds a client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] for an empty token, or
    /// [`Error::Http`] if the HTTP client cannot be constructed.
    pub fn new(mut config: ClientConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(Error::MissingToken);
        }
        config.page_size = config.page_size.clamp(1, MAX_PAGE_SIZE);
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(GithubClient { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches one page starting after `cursor`.
    pub async fn fetch_page(&self, cursor: Option<&str>) -> Result<IssuesPage> {
        let cfg = &self.config;
        let body = request_body(&cfg.owner, &cfg.name, cfg.page_size, cursor);
        let res = self
            .http
            .post(&cfg.endpoint)
            .bearer_auth(&cfg.token)
            .header(reqwest::header::ACCEPT, PREVIEW_ACCEPT)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let text = res.text().await?;
        IssuesPage::from_json(&text, &cfg.owner, &cfg.name)
    }

    /// Fetches every page, retrying each page per the retry policy.
    pub async fn fetch_all(&self) -> Result<Vec<Issue>> {
        collect_pages(|cursor| async move {
            self.config
                .retry
                .run("issues page", || self.fetch_page(cursor.as_deref()))
                .await
        })
        .await
    }
}

impl IssueSource for GithubClient {
    fn describe(&self) -> String {
        format!("github:{}/{}", self.config.owner, self.config.name)
    }

    fn fetch_issues(&self) -> impl Future<Output = Result<Vec<Issue>>> + Send {
        self.fetch_all()
    }
}

/// Drives a page fetcher from the first page until no cursor is returned,
/// flattening the pages.
///
/// # Errors
///
/// Propagates the first fetch error, and returns [`Error::StuckCursor`] if
/// a page hands back the cursor it was requested with.
pub async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Vec<Issue>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<IssuesPage>>,
{
    let mut issues = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;
    loop {
        let page = fetch(cursor.clone()).await?;
        pages += 1;
        issues.extend(page.issues);
        match page.next_cursor {
            None => break,
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                return Err(Error::StuckCursor(next));
            }
            Some(next) => cursor = Some(next),
        }
    }
    tracing::debug!(pages, issues = issues.len(), "fetched all issue pages");
    Ok(issues)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
