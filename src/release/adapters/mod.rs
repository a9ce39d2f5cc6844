//! Persistence adapters for versions.

mod memory;
pub mod postgres;
