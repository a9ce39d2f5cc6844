//! Sprint lifecycle guard and sprint planning.
//!
//! Sprints move through `planned -> active -> completed`. Within one project
//! at most one sprint is active at a time; the guard checks this before every
//! activation and the stores enforce it with a unique constraint so that
//! concurrent activations cannot both succeed. Deleting a sprint returns its
//! user stories to the backlog.
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
