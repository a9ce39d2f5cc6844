//! Kanban board columns.
//!
//! Every project starts with three default columns. Members may add custom
//! columns keyed by a normalised status; user stories link to the column whose
//! status matches their own.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
