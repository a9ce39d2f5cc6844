//! Domain model for tasks.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use task::{NewTask, PersistedTaskData, Task, TaskRevision, TaskStatus, TaskTitle};
