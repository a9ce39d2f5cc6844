//! User stories.
//!
//! Stories belong to a project and may be planned into a sprint, targeted at a
//! version, and linked to the kanban column matching their status key.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
