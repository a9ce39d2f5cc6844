//! Projects, ownership and membership.
//!
//! A project is owned by the account that created it and carries a member set
//! that always includes the owner. Membership gates read access to everything
//! inside the project; ownership gates destructive and lifecycle operations.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
