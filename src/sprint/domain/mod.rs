//! Domain model for sprints.

mod error;
mod ids;
mod sprint;

pub use error::{ParseSprintStatusError, SprintDomainError};
pub use ids::SprintId;
pub use sprint::{NewSprint, PersistedSprintData, Sprint, SprintName, SprintSchedule, SprintStatus};
