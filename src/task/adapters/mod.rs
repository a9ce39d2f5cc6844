//! Persistence adapters for tasks.

mod memory;
pub mod postgres;
