//! Port contracts for account and token persistence.

mod repository;

pub use repository::{TokenRepository, UserRepository};
