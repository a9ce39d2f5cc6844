//! Domain-focused tests for versions.

use crate::project::domain::ProjectId;
use crate::release::domain::{
    NewVersion, ReleaseDomainError, Version, VersionNumber, VersionStatus, VersionTitle,
};
use crate::test_support::date;
use mockable::DefaultClock;
use rstest::rstest;

fn version(release_date: Option<chrono::NaiveDate>) -> eyre::Result<Version> {
    Ok(Version::new(
        NewVersion {
            project_id: ProjectId::new(),
            title: VersionTitle::new("Spring release")?,
            description: None,
            number: VersionNumber::new("1.2.0")?,
            release_date,
        },
        &DefaultClock,
    ))
}

#[rstest]
#[case("1.0.0")]
#[case("2026.03")]
#[case("v2-beta")]
fn version_number_accepts_compact_labels(#[case] raw: &str) {
    assert!(VersionNumber::new(raw).is_ok());
}

#[rstest]
#[case("")]
#[case("1 0")]
fn version_number_rejects_blank_or_spaced_labels(#[case] raw: &str) {
    assert!(matches!(
        VersionNumber::new(raw),
        Err(ReleaseDomainError::InvalidNumber(_))
    ));
}

#[rstest]
fn new_versions_are_planned() -> eyre::Result<()> {
    eyre::ensure!(version(None)?.status() == VersionStatus::Planned, "planned");
    Ok(())
}

#[rstest]
fn releasing_stamps_today_when_no_date_is_set() -> eyre::Result<()> {
    let mut undated = version(None)?;
    undated.set_status(VersionStatus::Released, &DefaultClock);
    eyre::ensure!(undated.release_date().is_some(), "release date stamped");

    let planned_for = date(2026, 6, 1)?;
    let mut dated = version(Some(planned_for))?;
    dated.set_status(VersionStatus::Released, &DefaultClock);
    eyre::ensure!(dated.release_date() == Some(planned_for), "existing date kept");
    Ok(())
}

#[rstest]
#[case("planned", VersionStatus::Planned)]
#[case("IN_PROGRESS", VersionStatus::InProgress)]
#[case("Released", VersionStatus::Released)]
#[case("archived", VersionStatus::Archived)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: VersionStatus) {
    assert_eq!(VersionStatus::try_from(raw), Ok(expected));
}
