//! Domain model for versions.

mod error;
mod ids;
mod version;

pub use error::{ParseVersionStatusError, ReleaseDomainError};
pub use ids::VersionId;
pub use version::{
    NewVersion, PersistedVersionData, Version, VersionNumber, VersionStatus, VersionTitle,
};
