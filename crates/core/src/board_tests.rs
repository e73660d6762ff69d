// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn sprint() -> BoardConfig {
    BoardConfig::new("Sprint")
        .planned(["Backlog", "Ready"])
        .blocked(["Blocked", "Waiting for Response"])
}

#[parameterized(
    blocked_exact = { "Blocked", ColumnClass::Blocked },
    blocked_upper = { "BLOCKED", ColumnClass::Blocked },
    blocked_lower = { "blocked", ColumnClass::Blocked },
    blocked_spaces = { "waiting for response", ColumnClass::Blocked },
    planned_exact = { "Backlog", ColumnClass::Planned },
    planned_mixed = { "rEaDy", ColumnClass::Planned },
    in_progress = { "In Progress", ColumnClass::Neither },
    empty = { "", ColumnClass::Neither },
)]
fn classify_column(column: &str, expected: ColumnClass) {
    assert_eq!(sprint().classify(column), expected);
}

#[test]
fn classify_is_case_insensitive() {
    let board = sprint();
    assert_eq!(board.classify("BLOCKED"), board.classify("blocked"));
}

#[test]
fn name_set_dedups_folded_names() {
    let set = NameSet::new(["Bug", "bug", "BUG"]);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec!["bug"]);
    assert!(set.contains("bUg"));
}

#[test]
fn name_set_contains_any() {
    let set = NameSet::new(["bug"]);
    assert!(set.contains_any(&["urgent", "Bug"]));
    assert!(!set.contains_any(&["urgent"]));
    assert!(!set.contains_any::<&str>(&[]));
}

#[test]
fn effective_labels_fall_back_to_repository() {
    let repo = LabelSets::new(NameSet::new(["bug"]), NameSet::new(["L3"]));
    let board = sprint().bug_labels(["defect"]);

    assert!(board.effective_bug_labels(&repo).contains("defect"));
    assert!(!board.effective_bug_labels(&repo).contains("bug"));
    assert!(board.effective_support_labels(&repo).contains("l3"));
}

#[test]
fn validate_rejects_column_in_both_categories() {
    let board = BoardConfig::new("Sprint")
        .planned(["Backlog", "Waiting"])
        .blocked(["WAITING"]);

    let err = board.validate().unwrap_err();
    assert!(matches!(
        err,
        Error::AmbiguousColumn { ref column, .. } if column == "waiting"
    ));
}

#[parameterized(
    empty = { "" },
    blank = { "   " },
)]
fn validate_rejects_empty_name(name: &str) {
    assert!(matches!(
        BoardConfig::new(name).validate(),
        Err(Error::EmptyBoardName)
    ));
}

#[test]
fn board_set_rejects_duplicate_names() {
    let result = BoardSet::new(
        vec![BoardConfig::new("Sprint"), BoardConfig::new("SPRINT")],
        LabelSets::default(),
    );
    assert!(matches!(result, Err(Error::DuplicateBoard(name)) if name == "SPRINT"));
}

#[test]
fn board_set_lookup_ignores_case() {
    let set = BoardSet::new(
        vec![sprint(), BoardConfig::new("Support")],
        LabelSets::default(),
    )
    .unwrap();

    let id = set.lookup("support").unwrap();
    assert_eq!(set.get(id).unwrap().name, "Support");
    assert_eq!(set.lookup("SPRINT"), Some(set.iter().next().unwrap().0));
    assert!(set.lookup("Roadmap").is_none());
    assert_eq!(set.len(), 2);
}

#[test]
fn board_set_may_be_empty() {
    let set = BoardSet::new(Vec::new(), LabelSets::default()).unwrap();
    assert!(set.is_empty());
    assert!(set.lookup("anything").is_none());
}
