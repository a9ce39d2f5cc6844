//! Persistence adapters for accounts and tokens.
//!
//! - `memory`: [`crate::persistence::memory::InMemoryStore`] implementations
//! - [`postgres`]: Diesel row models and
//!   [`crate::persistence::postgres::PostgresStore`] implementations

mod memory;
pub mod postgres;
