//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The owner identity is empty after trimming.
    #[error("owner identity must not be empty")]
    EmptyOwnerId,

    /// A completed row was read without its completion snapshot.
    #[error("completed task {0} is missing its last active status")]
    MissingCompletionSnapshot(TaskId),

    /// An active row was read with a stale completion snapshot attached.
    #[error("task {0} is not completed but carries a last active status")]
    UnexpectedCompletionSnapshot(TaskId),

    /// Completion was requested for a task already in the archive.
    #[error("task {0} is already completed")]
    AlreadyCompleted(TaskId),

    /// Undo was requested for a task that is not completed.
    #[error("task {0} is not completed")]
    NotCompleted(TaskId),
}

/// Error returned while parsing status values from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);
