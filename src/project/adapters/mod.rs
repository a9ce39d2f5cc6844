//! Persistence adapters for projects.

mod memory;
pub mod postgres;
