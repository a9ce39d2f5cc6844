//! Application services for the sprint lifecycle and sprint planning.

mod lifecycle;

pub use lifecycle::{
    CreateSprintRequest, SprintLifecycleError, SprintLifecycleResult, SprintLifecycleService,
    UpdateSprintRequest,
};
