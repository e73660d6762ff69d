// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::Error;
use fg_core::IssueState;

const ISSUES: &str = r#"[
  {
    "url": "https://github.com/acme/widgets/issues/1",
    "title": "Widget jams",
    "state": "CLOSED",
    "createdAt": "2024-01-01T00:00:00Z",
    "closedAt": "2024-01-11T00:00:00Z",
    "labels": ["bug"],
    "placements": [{ "board": "Sprint", "column": "Done" }]
  },
  {
    "url": "https://github.com/acme/widgets/issues/2",
    "title": "Docs",
    "state": "OPEN",
    "createdAt": "2024-01-03T00:00:00Z"
  }
]"#;

const PAGES: &str = r#"[
  {"data":{"repository":{"issues":{
    "pageInfo":{"hasNextPage":true,"endCursor":"a"},
    "nodes":[{"url":"u1","title":"one","state":"OPEN","createdAt":"2024-01-01T00:00:00Z"}]}}}},
  {"data":{"repository":{"issues":{
    "pageInfo":{"hasNextPage":false,"endCursor":null},
    "nodes":[{"url":"u2","title":"two","state":"CLOSED",
              "createdAt":"2024-01-01T00:00:00Z","closedAt":"2024-01-02T00:00:00Z"}]}}}}
]"#;

#[test]
fn parses_issue_array() {
    let issues = FixtureSource::new("x.json").parse(ISSUES).unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].state, IssueState::Closed);
    assert_eq!(issues[0].placements.len(), 1);
    assert!(issues[1].labels.is_empty());
}

#[test]
fn parses_recorded_pages() {
    let issues = FixtureSource::new("x.json").parse(PAGES).unwrap();
    let titles: Vec<_> = issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two"]);
}

#[test]
fn parses_single_page() {
    let body = r#"{"data":{"repository":{"issues":{"nodes":[
        {"url":"u1","title":"one","state":"OPEN","createdAt":"2024-01-01T00:00:00Z"}]}}}}"#;
    let issues = FixtureSource::new("x.json").parse(body).unwrap();
    assert_eq!(issues.len(), 1);
}

#[test]
fn recorded_missing_repository_names_it() {
    let body = r#"[{"data":{"repository":null}}]"#;
    let err = FixtureSource::new("x.json")
        .with_repository("acme", "widgets")
        .parse(body)
        .unwrap_err();
    assert!(err.to_string().contains("acme/widgets"));
}

#[test]
fn garbage_is_json_error() {
    let err = FixtureSource::new("x.json").parse("not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn fetches_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("issues.json");
    std::fs::write(&path, ISSUES).unwrap();

    let source = FixtureSource::new(&path);
    let issues = source.fetch_issues().await.unwrap();
    assert_eq!(issues.len(), 2);
    assert!(source.describe().ends_with("issues.json"));
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FixtureSource::new(dir.path().join("absent.json"));
    let err = source.fetch_issues().await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
