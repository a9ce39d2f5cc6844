//! Domain model for kanban columns and status keys.

mod column;
mod error;
mod ids;
mod status_key;

pub use column::{ColumnName, KanbanColumn, NewKanbanColumn, PersistedColumnData};
pub use error::BoardDomainError;
pub use ids::ColumnId;
pub use status_key::StatusKey;
