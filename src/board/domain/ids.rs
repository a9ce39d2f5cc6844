//! Identifier types for the board domain.

crate::uuid_identifier!(
    /// Unique identifier for a kanban column.
    ColumnId
);
