//! Repository port for owner-scoped task persistence.
//!
//! The contract mirrors the row-level operations the board needs: select by
//! owner, insert, two update shapes (generic status write and completion
//! write), and delete. Every mutating operation is scoped by `(id, owner)`
//! and reports zero affected rows as [`TaskRepositoryError::NotFound`],
//! never as a silent success.

use crate::task::domain::{ActiveStatus, NewTask, OwnerId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns all tasks owned by the given caller, in store-native order.
    async fn list_by_owner(&self, owner: &OwnerId) -> TaskRepositoryResult<Vec<Task>>;

    /// Inserts a new task and returns it with its store-assigned identifier.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Writes an active status to the row matching `(id, owner)`, clearing
    /// any completion snapshot, and returns the updated row.
    ///
    /// Serves both re-drags between columns and the undo restoration write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no row matches.
    async fn set_active_status(
        &self,
        id: TaskId,
        owner: &OwnerId,
        status: ActiveStatus,
    ) -> TaskRepositoryResult<Task>;

    /// Marks the row matching `(id, owner)` completed, recording the
    /// caller-supplied prior status as the restore snapshot in the same
    /// update, and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no row matches.
    async fn mark_completed(
        &self,
        id: TaskId,
        owner: &OwnerId,
        last_active: ActiveStatus,
    ) -> TaskRepositoryResult<Task>;

    /// Deletes the row matching `(id, owner)`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no row matches,
    /// including a repeat delete of the same task.
    async fn delete(&self, id: TaskId, owner: &OwnerId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// No row matched the `(id, owner)` scope.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
