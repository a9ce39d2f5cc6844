//! Application services for versions.

mod releases;

pub use releases::{
    ReleaseService, ReleaseServiceError, ReleaseServiceResult, UpdateVersionRequest,
    VersionRequest,
};
