//! Application services for tasks.

mod tasks;

pub use tasks::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
