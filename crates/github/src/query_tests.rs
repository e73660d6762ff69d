// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;

const PAGE: &str = r#"{
  "data": {
    "repository": {
      "issues": {
        "pageInfo": { "hasNextPage": true, "endCursor": "Y3Vyc29yOjE=" },
        "nodes": [
          {
            "url": "https://github.com/acme/widgets/issues/1",
            "title": "Widget jams",
            "state": "CLOSED",
            "createdAt": "2024-01-01T00:00:00Z",
            "closedAt": "2024-01-11T00:00:00Z",
            "labels": { "nodes": [{ "name": "bug" }, { "name": "L3" }] },
            "projectCards": {
              "nodes": [
                { "column": { "name": "Done", "project": { "name": "Sprint" } } },
                { "column": null }
              ]
            },
            "timelineItems": {
              "nodes": [
                {
                  "__typename": "AddedToProjectEvent",
                  "createdAt": "2024-01-01T12:00:00Z",
                  "project": { "name": "Sprint" }
                },
                {
                  "__typename": "MovedColumnsInProjectEvent",
                  "createdAt": "2024-01-02T00:00:00Z",
                  "project": { "name": "Sprint" },
                  "previousProjectColumnName": "Inbox",
                  "projectColumnName": "Backlog"
                },
                {
                  "__typename": "AddedToProjectEvent",
                  "createdAt": "2024-01-02T00:00:00Z",
                  "project": null
                },
                { "__typename": "LabeledEvent" },
                null
              ]
            }
          },
          {
            "url": "https://github.com/acme/widgets/issues/2",
            "title": "Docs",
            "state": "OPEN",
            "createdAt": "2024-01-03T00:00:00Z",
            "closedAt": null,
            "labels": { "nodes": [] },
            "projectCards": { "nodes": [] },
            "timelineItems": { "nodes": [] }
          }
        ]
      }
    }
  }
}"#;

#[test]
fn decodes_issue_page() {
    let page = IssuesPage::from_json(PAGE, "acme", "widgets").unwrap();
    assert_eq!(page.next_cursor.as_deref(), Some("Y3Vyc29yOjE="));
    assert_eq!(page.issues.len(), 2);

    let first = &page.issues[0];
    assert_eq!(first.state, IssueState::Closed);
    assert_eq!(first.labels, vec!["bug", "L3"]);
    assert_eq!(first.placements, vec![BoardPlacement::new("Sprint", "Done")]);
    assert_eq!(
        first.timeline,
        vec![
            TimelineEvent::AddedToBoard {
                board: "Sprint".into(),
                at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            },
            TimelineEvent::MovedColumn {
                board: "Sprint".into(),
                from_column: "Inbox".into(),
                to_column: "Backlog".into(),
                at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            },
        ]
    );

    let second = &page.issues[1];
    assert_eq!(second.state, IssueState::Open);
    assert!(second.closed_at.is_none());
}

#[test]
fn last_page_has_no_cursor() {
    let body = r#"{"data":{"repository":{"issues":{
        "pageInfo":{"hasNextPage":false,"endCursor":"abc"},
        "nodes":[]}}}}"#;
    let page = IssuesPage::from_json(body, "acme", "widgets").unwrap();
    assert!(page.next_cursor.is_none());
    assert!(page.issues.is_empty());
}

#[test]
fn graphql_errors_are_reported() {
    let body = r#"{"data":null,"errors":[{"message":"Field 'x' doesn't exist"},{"message":"second"}]}"#;
    let err = IssuesPage::from_json(body, "acme", "widgets").unwrap_err();
    assert!(matches!(err, Error::GraphQl(ref msg) if msg.contains("'x'") && msg.contains("second")));
}

#[test]
fn null_repository_is_not_found() {
    let body = r#"{"data":{"repository":null}}"#;
    let err = IssuesPage::from_json(body, "acme", "widgets").unwrap_err();
    assert!(matches!(err, Error::RepositoryNotFound { .. }));
}

#[test]
fn unknown_state_is_invalid_response() {
    let body = r#"{"data":{"repository":{"issues":{"nodes":[{
        "url":"u","title":"t","state":"MERGED","createdAt":"2024-01-01T00:00:00Z"
    }]}}}}"#;
    let err = IssuesPage::from_json(body, "acme", "widgets").unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(ref msg) if msg.contains("MERGED")));
}

#[test]
fn request_body_carries_variables() {
    let body = request_body("acme", "widgets", 50, Some("abc"));
    assert_eq!(body["variables"]["owner"], "acme");
    assert_eq!(body["variables"]["pageSize"], 50);
    assert_eq!(body["variables"]["cursor"], "abc");
    assert!(body["query"].as_str().unwrap().contains("timelineItems"));

    let first = request_body("acme", "widgets", 50, None);
    assert!(first["variables"]["cursor"].is_null());
}

#[test]
fn more_results_without_cursor_is_invalid() {
    let body = r#"{"data":{"repository":{"issues":{
        "pageInfo":{"hasNextPage":true,"endCursor":null},
        "nodes":[]}}}}"#;
    let err = IssuesPage::from_json(body, "acme", "widgets").unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(ref msg) if msg.contains("cursor")));
}

#[test]
fn capped_nested_connections_are_flagged() {
    let body = r#"{"data":{"repository":{"issues":{"nodes":[
        {
            "url":"https://github.com/acme/widgets/issues/7","title":"busy","state":"OPEN",
            "createdAt":"2024-01-01T00:00:00Z",
            "labels":{"pageInfo":{"hasNextPage":false},"nodes":[]},
            "projectCards":{"pageInfo":{"hasNextPage":true},"nodes":[
                {"column":{"name":"Ready","project":{"name":"Sprint"}}}
            ]},
            "timelineItems":{"pageInfo":{"hasNextPage":true},"nodes":[]}
        },
        {
            "url":"https://github.com/acme/widgets/issues/8","title":"quiet","state":"OPEN",
            "createdAt":"2024-01-01T00:00:00Z",
            "projectCards":{"pageInfo":{"hasNextPage":false},"nodes":[]}
        }
    ]}}}}"#;
    let page = IssuesPage::from_json(body, "acme", "widgets").unwrap();
    assert_eq!(page.issues.len(), 2);
    assert_eq!(page.issues[0].placements.len(), 1);
    assert_eq!(
        page.truncated,
        vec!["https://github.com/acme/widgets/issues/7".to_string()]
    );
}

#[test]
fn query_asks_for_nested_page_info() {
    assert_eq!(ISSUES_QUERY.matches("pageInfo { hasNextPage }").count(), 3);
}
