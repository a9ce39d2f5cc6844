//! Port contracts for user story persistence.

mod repository;

pub use repository::StoryRepository;
