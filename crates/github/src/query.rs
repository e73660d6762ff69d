// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GraphQL query text and response decoding.
//!
//! One request returns a page of issues with their labels, project cards
//! and board-movement timeline. [`IssuesPage::from_response`] converts the
//! raw response into fg-core issues.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use fg_core::{BoardPlacement, Issue, IssueState, TimelineEvent};

use crate::error::{Error, Result};

/// Paginated issues query. Variables: `owner`, `name`, `pageSize`, `cursor`.
pub const ISSUES_QUERY: &str = r#"
query($owner: String!, $name: String!, $pageSize: Int!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    issues(first: $pageSize, after: $cursor, orderBy: {field: CREATED_AT, direction: ASC}) {
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        url
        title
        state
        createdAt
        closedAt
        labels(first: 100) {
          pageInfo { hasNextPage }
          nodes { name }
        }
        projectCards(first: 25) {
          pageInfo { hasNextPage }
          nodes {
            column {
              name
              project { name }
            }
          }
        }
        timelineItems(first: 100, itemTypes: [ADDED_TO_PROJECT_EVENT, MOVED_COLUMNS_IN_PROJECT_EVENT]) {
          pageInfo { hasNextPage }
          nodes {
            __typename
            ... on AddedToProjectEvent {
              createdAt
              project { name }
            }
            ... on MovedColumnsInProjectEvent {
              createdAt
              project { name }
              previousProjectColumnName
              projectColumnName
            }
          }
        }
      }
    }
  }
}
"#;

/// Builds the JSON request body for one page.
pub fn request_body(owner: &str, name: &str, page_size: u32, cursor: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "query": ISSUES_QUERY,
        "variables": {
            "owner": owner,
            "name": name,
            "pageSize": page_size,
            "cursor": cursor,
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    issues: Connection<IssueNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection<T> {
    #[serde(default)]
    page_info: Option<PageInfo>,
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<T>>,
}

impl<T> Connection<T> {
    /// True when the server holds more nodes than this response carries.
    fn is_truncated(&self) -> bool {
        self.page_info.as_ref().is_some_and(|p| p.has_next_page)
    }

    fn into_nodes(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    #[serde(default)]
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    url: String,
    title: String,
    state: String,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    labels: Option<Connection<LabelNode>>,
    project_cards: Option<Connection<CardNode>>,
    timeline_items: Option<Connection<TimelineNode>>,
}

#[derive(Debug, Deserialize)]
struct LabelNode {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CardNode {
    column: Option<ColumnNode>,
}

#[derive(Debug, Deserialize)]
struct ColumnNode {
    name: String,
    project: ProjectNode,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename", rename_all_fields = "camelCase")]
enum TimelineNode {
    AddedToProjectEvent {
        created_at: DateTime<Utc>,
        project: Option<ProjectNode>,
    },
    MovedColumnsInProjectEvent {
        created_at: DateTime<Utc>,
        project: Option<ProjectNode>,
        #[serde(default)]
        previous_project_column_name: String,
        project_column_name: String,
    },
    #[serde(other)]
    Other,
}

impl TimelineNode {
    /// Converts to a core event; nodes without a project are dropped.
    fn into_event(self) -> Option<TimelineEvent> {
        match self {
            TimelineNode::AddedToProjectEvent {
                created_at,
                project: Some(project),
            } => Some(TimelineEvent::AddedToBoard {
                board: project.name,
                at: created_at,
            }),
            TimelineNode::MovedColumnsInProjectEvent {
                created_at,
                project: Some(project),
                previous_project_column_name,
                project_column_name,
            } => Some(TimelineEvent::MovedColumn {
                board: project.name,
                from_column: previous_project_column_name,
                to_column: project_column_name,
                at: created_at,
            }),
            _ => None,
        }
    }
}

impl IssueNode {
    /// Names of the nested connections cut off by their `first:` cap.
    fn truncated_connections(&self) -> Vec<&'static str> {
        let mut cut = Vec::new();
        if self.labels.as_ref().is_some_and(Connection::is_truncated) {
            cut.push("labels");
        }
        if self.project_cards.as_ref().is_some_and(Connection::is_truncated) {
            cut.push("projectCards");
        }
        if self.timeline_items.as_ref().is_some_and(Connection::is_truncated) {
            cut.push("timelineItems");
        }
        cut
    }

    fn into_issue(self) -> Result<Issue> {
        let state: IssueState = self
            .state
            .parse()
            .map_err(|_| Error::InvalidResponse(format!("unknown issue state '{}'", self.state)))?;

        let labels = self
            .labels
            .map(|c| c.into_nodes().map(|l| l.name).collect())
            .unwrap_or_default();
        let placements = self
            .project_cards
            .map(|c| {
                c.into_nodes()
                    .filter_map(|card| card.column)
                    .map(|col| BoardPlacement::new(col.project.name, col.name))
                    .collect()
            })
            .unwrap_or_default();
        let timeline = self
            .timeline_items
            .map(|c| c.into_nodes().filter_map(TimelineNode::into_event).collect())
            .unwrap_or_default();

        Ok(Issue {
            url: self.url,
            title: self.title,
            state,
            created_at: self.created_at,
            closed_at: self.closed_at,
            labels,
            placements,
            timeline,
        })
    }
}

/// One decoded page of issues.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuesPage {
    pub issues: Vec<Issue>,
    /// Cursor for the next page, or `None` on the last page.
    pub next_cursor: Option<String>,
    /// URLs of issues whose labels, cards or timeline were cut off.
    pub truncated: Vec<String>,
}

impl IssuesPage {
    /// Decodes a GraphQL response for the given repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphQl`] when the response carries errors,
    /// [`Error::RepositoryNotFound`] when the repository is null, and
    /// [`Error::InvalidResponse`] for malformed issue nodes.
    pub fn from_response(response: GraphQlResponse, owner: &str, name: &str) -> Result<Self> {
        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQl(messages.join("; ")));
        }
        let Some(repository) = response.data.and_then(|d| d.repository) else {
            return Err(Error::RepositoryNotFound {
                owner: owner.to_string(),
                name: name.to_string(),
            });
        };

        let connection = repository.issues;
        let next_cursor = match &connection.page_info {
            Some(PageInfo {
                has_next_page: true,
                end_cursor: Some(cursor),
            }) => Some(cursor.clone()),
            Some(PageInfo {
                has_next_page: true,
                end_cursor: None,
            }) => {
                return Err(Error::InvalidResponse(
                    "issues page reports more results but no end cursor".to_string(),
                ));
            }
            _ => None,
        };

        let mut issues = Vec::new();
        let mut truncated = Vec::new();
        for node in connection.into_nodes() {
            let cut = node.truncated_connections();
            if !cut.is_empty() {
                tracing::warn!(
                    issue = %node.url,
                    connections = ?cut,
                    "issue has more nested items than one request returns; metrics may be incomplete"
                );
                truncated.push(node.url.clone());
            }
            issues.push(node.into_issue()?);
        }

        Ok(IssuesPage {
            issues,
            next_cursor,
            truncated,
        })
    }

    /// Parses and decodes a raw JSON response body.
    pub fn from_json(body: &str, owner: &str, name: &str) -> Result<Self> {
        let response: GraphQlResponse = serde_json::from_str(body)?;
        Self::from_response(response, owner, name)
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
