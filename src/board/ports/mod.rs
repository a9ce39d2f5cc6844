//! Port contracts for kanban column persistence.

mod repository;

pub use repository::ColumnRepository;
