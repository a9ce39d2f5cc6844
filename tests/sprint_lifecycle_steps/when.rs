//! When steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{username}" starts sprint "{name}""#)]
fn start_sprint(world: &mut SprintWorld, username: String, name: String) -> Result<(), eyre::Report> {
    let acting = world.user(&username)?;
    let sprint_id = world.sprint(&name)?.id();
    let result = run_async(world.sprints.start(sprint_id, acting));
    if let Ok(ref started) = result {
        world.sprints_by_name.insert(name, started.clone());
    }
    world.last_result = Some(result);
    Ok(())
}
