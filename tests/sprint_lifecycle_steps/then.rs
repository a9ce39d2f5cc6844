//! Then steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, run_async};
use rstest_bdd_macros::then;
use sprintboard::project::services::AccessError;
use sprintboard::sprint::domain::{SprintDomainError, SprintStatus};
use sprintboard::sprint::ports::SprintRepository;
use sprintboard::sprint::services::SprintLifecycleError;

#[then(r#"sprint "{name}" is "{status}""#)]
fn sprint_has_status(world: &SprintWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let expected = SprintStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let sprint_id = world.sprint(&name)?.id();
    let stored = run_async(world.store.find_sprint(sprint_id))?
        .ok_or_else(|| eyre::eyre!("sprint {name} is not stored"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected sprint {name} to be {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

fn last_error(world: &SprintWorld) -> Result<&SprintLifecycleError, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(sprint)) => Err(eyre::eyre!("expected a failure, sprint became {}", sprint.status())),
        None => Err(eyre::eyre!("missing lifecycle result")),
    }
}

#[then("the lifecycle operation fails because another sprint is active")]
fn fails_with_conflict(world: &SprintWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !matches!(err, SprintLifecycleError::ConflictingActiveSprint { .. }) {
        return Err(eyre::eyre!("expected ConflictingActiveSprint, got {err:?}"));
    }
    Ok(())
}

#[then("the lifecycle operation fails because the user is not the owner")]
fn fails_with_not_owner(world: &SprintWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !matches!(err, SprintLifecycleError::Access(AccessError::NotOwner { .. })) {
        return Err(eyre::eyre!("expected NotOwner, got {err:?}"));
    }
    Ok(())
}

#[then("the lifecycle operation fails with an invalid transition")]
fn fails_with_invalid_transition(world: &SprintWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !matches!(
        err,
        SprintLifecycleError::Domain(SprintDomainError::InvalidTransition {
            from: SprintStatus::Completed,
            to: SprintStatus::Active,
            ..
        })
    ) {
        return Err(eyre::eyre!("expected InvalidTransition, got {err:?}"));
    }
    Ok(())
}
