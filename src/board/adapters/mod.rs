//! Persistence adapters for kanban columns.

mod memory;
pub mod postgres;
