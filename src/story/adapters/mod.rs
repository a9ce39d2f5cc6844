//! Persistence adapters for user stories.

mod memory;
pub mod postgres;
