//! Port contracts for version persistence.

mod repository;

pub use repository::VersionRepository;
