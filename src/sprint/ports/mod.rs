//! Port contracts for sprint persistence.

mod repository;

pub use repository::SprintRepository;
