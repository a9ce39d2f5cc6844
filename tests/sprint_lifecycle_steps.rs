//! Behaviour tests for the sprint lifecycle and the single-active-sprint rule.

#[path = "sprint_lifecycle_steps/mod.rs"]
mod sprint_lifecycle_steps_defs;

use rstest_bdd_macros::scenario;
use sprint_lifecycle_steps_defs::world::{SprintWorld, world};

#[scenario(
    path = "tests/features/sprint_lifecycle.feature",
    name = "Start a planned sprint"
)]
#[tokio::test(flavor = "multi_thread")]
async fn start_a_planned_sprint(world: SprintWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/sprint_lifecycle.feature",
    name = "Refuse a second active sprint"
)]
#[tokio::test(flavor = "multi_thread")]
async fn refuse_a_second_active_sprint(world: SprintWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/sprint_lifecycle.feature",
    name = "Completing the active sprint frees the slot"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completing_frees_the_slot(world: SprintWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/sprint_lifecycle.feature",
    name = "Members cannot start sprints"
)]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_start_sprints(world: SprintWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/sprint_lifecycle.feature",
    name = "Completed sprints cannot restart"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_sprints_cannot_restart(world: SprintWorld) {
    let _ = world;
}
