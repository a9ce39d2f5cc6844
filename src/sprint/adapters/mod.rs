//! Persistence adapters for sprints.

mod memory;
pub mod postgres;
