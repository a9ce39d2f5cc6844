//! Technical tasks within user stories.
//!
//! Tasks break a user story into units of work with their own workflow status
//! (`todo -> in_progress -> done`, freely editable) and an optional assignee
//! drawn from the project members. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
