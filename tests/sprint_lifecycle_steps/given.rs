//! Given steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, run_async};
use chrono::NaiveDate;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use sprintboard::project::services::CreateProjectRequest;
use sprintboard::sprint::services::CreateSprintRequest;

#[given(r#"a project owned by "{owner}" with member "{member}""#)]
fn project_with_team(
    world: &mut SprintWorld,
    owner: String,
    member: String,
) -> Result<(), eyre::Report> {
    let owner_id = world.register(&owner)?;
    world.register(&member)?;
    let project = run_async(world.projects.create(
        CreateProjectRequest::new("Apollo").with_members([member]),
        owner_id,
    ))
    .wrap_err("create scenario project")?;
    world.project = Some(project.id());
    world.owner = Some(owner_id);
    Ok(())
}

#[given(r#"a planned sprint named "{name}""#)]
fn planned_sprint(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).ok_or_else(|| eyre::eyre!("bad date"))?;
    let end = NaiveDate::from_ymd_opt(2026, 3, 13).ok_or_else(|| eyre::eyre!("bad date"))?;
    let owner = world.owner()?;
    let sprint = run_async(world.sprints.create(
        CreateSprintRequest::new(world.project()?, name.as_str(), start, end),
        owner,
    ))
    .wrap_err("create scenario sprint")?;
    world.sprints_by_name.insert(name, sprint);
    Ok(())
}

#[given(r#""{username}" has started sprint "{name}""#)]
fn sprint_started(world: &mut SprintWorld, username: String, name: String) -> Result<(), eyre::Report> {
    let acting = world.user(&username)?;
    let sprint_id = world.sprint(&name)?.id();
    let started = run_async(world.sprints.start(sprint_id, acting)).wrap_err("start sprint in setup")?;
    world.sprints_by_name.insert(name, started);
    Ok(())
}

#[given(r#""{username}" has completed sprint "{name}""#)]
fn sprint_completed(
    world: &mut SprintWorld,
    username: String,
    name: String,
) -> Result<(), eyre::Report> {
    let acting = world.user(&username)?;
    let sprint_id = world.sprint(&name)?.id();
    let completed =
        run_async(world.sprints.complete(sprint_id, acting)).wrap_err("complete sprint in setup")?;
    world.sprints_by_name.insert(name, completed);
    Ok(())
}
