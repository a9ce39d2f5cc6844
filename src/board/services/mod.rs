//! Application services for kanban columns.

mod columns;

pub use columns::{
    BoardService, BoardServiceError, BoardServiceResult, CreateColumnRequest, UpdateColumnRequest,
};
