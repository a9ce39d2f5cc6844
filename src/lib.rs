//! Sprintboard: agile project tracking behind a bearer-token REST API.
//!
//! Teams organise work into projects. Each project holds user stories,
//! broken down into tasks, planned into time-boxed sprints, tracked on a
//! kanban board, and grouped into release versions.
//!
//! # Architecture
//!
//! Every bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: validated aggregates and state machines with no
//!   infrastructure dependencies
//! - **Ports**: repository traits the services depend on
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: access checks and cross-aggregate rules
//!
//! # Modules
//!
//! - [`identity`]: accounts, password hashing, and bearer tokens
//! - [`project`]: projects, membership, and the access guard
//! - [`sprint`]: the sprint lifecycle (`PLANNED`, `ACTIVE`, `COMPLETED`) and
//!   sprint planning
//! - [`story`]: user stories and their workflow status
//! - [`task`]: tasks within user stories
//! - [`board`]: kanban columns keyed by workflow status
//! - [`release`]: release versions
//! - [`persistence`]: the shared stores implementing every port
//! - [`http`]: the axum REST surface

pub mod board;
pub mod config;
pub mod http;
pub mod identifier;
pub mod identity;
pub mod logging;
pub mod persistence;
pub mod project;
pub mod release;
pub mod sprint;
pub mod story;
pub mod task;

#[cfg(test)]
pub(crate) mod test_support;
