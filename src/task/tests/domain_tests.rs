//! Domain-focused tests for task values.

use crate::task::domain::{TaskDomainError, TaskStatus, TaskTitle};
use rstest::rstest;

#[rstest]
#[case("TODO", TaskStatus::Todo)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("Done", TaskStatus::Done)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_value() {
    assert!(TaskStatus::try_from("blocked").is_err());
}

#[rstest]
fn status_defaults_to_todo() {
    assert_eq!(TaskStatus::default(), TaskStatus::Todo);
}

#[rstest]
fn status_uses_wire_and_storage_spellings() -> eyre::Result<()> {
    let json = serde_json::to_string(&TaskStatus::InProgress)?;
    eyre::ensure!(json == "\"IN_PROGRESS\"", "unexpected JSON: {json}");
    eyre::ensure!(TaskStatus::InProgress.as_str() == "in_progress", "storage spelling");
    Ok(())
}

#[rstest]
fn title_rejects_blank() {
    assert_eq!(TaskTitle::new("  "), Err(TaskDomainError::EmptyTitle));
}
