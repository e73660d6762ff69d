// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::board::{BoardConfig, LabelSets, NameSet};
use crate::issue::TimelineEvent;
use chrono::{TimeDelta, TimeZone};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(n)
}

fn boards() -> BoardSet {
    BoardSet::new(
        vec![
            BoardConfig::new("Sprint")
                .planned(["Backlog"])
                .blocked(["Blocked"]),
            BoardConfig::new("Support")
                .planned(["Triage"])
                .blocked(["Waiting"])
                .bug_labels(["bug"])
                .support_labels(["urgent"]),
        ],
        LabelSets::new(NameSet::new(["bug"]), NameSet::new(["L3"])),
    )
    .unwrap()
}

fn moved_to(board: &str, column: &str, at: DateTime<Utc>) -> TimelineEvent {
    TimelineEvent::MovedColumn {
        board: board.into(),
        from_column: "Inbox".into(),
        to_column: column.into(),
        at,
    }
}

#[test]
fn planned_move_scenario() {
    let boards = boards();
    let issue = Issue::new("u/1", "t", day(0))
        .closed(day(10))
        .on_board("Sprint", "Done")
        .with_event(moved_to("Sprint", "Backlog", day(1)));

    let snap = assemble([&issue], &boards, day(20));
    let sprint = snap.board("Sprint").unwrap();
    assert_eq!(sprint.avg_lead_time_days, 10.0);
    assert_eq!(sprint.avg_cycle_time_days, 9.0);
}

#[test]
fn added_to_board_scenario() {
    let boards = boards();
    let issue = Issue::new("u/1", "t", day(0))
        .closed(day(8))
        .on_board("Sprint", "Done")
        .with_event(TimelineEvent::AddedToBoard {
            board: "Sprint".into(),
            at: day(2),
        });

    let snap = assemble([&issue], &boards, day(20));
    assert_eq!(snap.board("Sprint").unwrap().avg_cycle_time_days, 6.0);
}

#[test]
fn board_without_closed_issues_reports_nan_without_affecting_others() {
    let boards = boards();
    let issues = vec![
        Issue::new("u/1", "t", day(0))
            .closed(day(4))
            .on_board("Sprint", "Done"),
        Issue::new("u/2", "t", day(0)).on_board("Support", "Triage"),
    ];

    let snap = assemble(&issues, &boards, day(20));
    let support = snap.board("Support").unwrap();
    assert!(support.avg_lead_time_days.is_nan());
    assert!(support.avg_cycle_time_days.is_nan());
    assert_eq!(snap.board("Sprint").unwrap().avg_lead_time_days, 4.0);
}

#[test]
fn label_matching_bug_and_support_sets_counts_both() {
    let boards = boards();
    let issue = Issue::new("u/1", "t", day(0))
        .with_label("bug")
        .with_label("urgent")
        .on_board("Support", "In Progress");

    let snap = assemble([&issue], &boards, day(1));
    let support = snap.board("Support").unwrap();
    assert_eq!(support.open_bugs, 1);
    assert_eq!(support.open_support, 1);
    // Repository support labels are L3 only.
    assert_eq!(snap.totals.open_bugs, 1);
    assert_eq!(snap.totals.open_support, 0);
}

#[test]
fn issue_on_two_boards_counts_independently() {
    let boards = boards();
    let issue = Issue::new("u/1", "t", day(0))
        .on_board("Sprint", "Blocked")
        .on_board("Support", "Triage");

    let snap = assemble([&issue], &boards, day(1));
    let sprint = snap.board("Sprint").unwrap();
    let support = snap.board("Support").unwrap();
    assert_eq!((sprint.open, sprint.blocked, sprint.planned), (1, 1, 0));
    assert_eq!((support.open, support.blocked, support.planned), (1, 0, 1));
    assert_eq!(snap.totals.open, 1);
}

#[test]
fn open_plus_closed_equals_issues_on_board() {
    let boards = boards();
    let issues = vec![
        Issue::new("u/1", "t", day(0)).on_board("Sprint", "Backlog"),
        Issue::new("u/2", "t", day(0))
            .closed(day(3))
            .on_board("Sprint", "Done"),
        Issue::new("u/3", "t", day(0))
            .closed(day(5))
            .on_board("sprint", "Done"),
        Issue::new("u/4", "t", day(0)).on_board("Support", "Triage"),
        Issue::new("u/5", "t", day(0)),
    ];

    let snap = assemble(&issues, &boards, day(9));
    let sprint = snap.board("Sprint").unwrap();
    assert_eq!(sprint.open + sprint.closed, 3);
    assert_eq!(snap.totals.all, 5);
    assert_eq!(snap.totals.open, 3);
    assert_eq!(snap.totals.closed, 2);
}

#[test]
fn unconfigured_board_counts_only_in_totals() {
    let boards = boards();
    let issue = Issue::new("u/1", "t", day(0))
        .with_label("BUG")
        .on_board("Roadmap", "Blocked");

    let snap = assemble([&issue], &boards, day(1));
    assert_eq!(snap.totals.open, 1);
    assert_eq!(snap.totals.open_bugs, 1);
    assert!(snap.board("Roadmap").is_none());
    assert!(snap.boards.values().all(|b| b.open == 0));
}

#[test]
fn duplicate_placement_on_same_board_counts_once() {
    let boards = boards();
    let issue = Issue::new("u/1", "t", day(0))
        .on_board("Sprint", "Blocked")
        .on_board("SPRINT", "Backlog");

    let snap = assemble([&issue], &boards, day(1));
    let sprint = snap.board("Sprint").unwrap();
    assert_eq!(sprint.open, 1);
    assert_eq!(sprint.blocked, 1);
    assert_eq!(sprint.planned, 0);
}

#[test]
fn every_configured_board_appears_in_snapshot() {
    let boards = boards();
    let snap = assemble(std::iter::empty(), &boards, day(1));
    assert_eq!(
        snap.boards.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Sprint", "Support"]
    );
    assert_eq!(snap.totals, RepoTotals::default());
    assert_eq!(snap.taken_at, day(1));
}

#[test]
fn merged_partitions_match_single_pass() {
    let boards = boards();
    let issues: Vec<Issue> = (0..6)
        .map(|i| {
            let issue = Issue::new(format!("u/{i}"), "t", day(0)).on_board("Sprint", "Backlog");
            if i % 2 == 0 {
                issue.closed(day(i + 1))
            } else {
                issue
            }
        })
        .collect();

    let whole = assemble(&issues, &boards, day(30));

    let (left, right) = issues.split_at(2);
    let mut first = Assembler::new(&boards);
    first.extend(left);
    let mut second = Assembler::new(&boards);
    second.extend(right);
    first.merge(second);
    assert_eq!(first.issue_count(), 6);
    let merged = first.finish(day(30));

    // Support has no closed issues, so compare the board that has averages.
    assert_eq!(merged.totals, whole.totals);
    assert_eq!(merged.board("Sprint"), whole.board("Sprint"));
    assert_eq!(merged.board("Sprint").unwrap().avg_lead_time_days, 3.0);
}
