//! Accounts and bearer-token authentication.
//!
//! Users register with a username, email and password; login issues an opaque
//! bearer token whose SHA-256 digest is persisted with an expiry. Every other
//! context receives the resolved [`domain::UserId`] of the acting user.
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
