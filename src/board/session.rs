//! Board session wiring the controller to the lifecycle service.
//!
//! The session is the interaction-surface boundary: each entry event stages
//! an optimistic mutation, calls the service with a timeout, and commits or
//! rolls back when the call settles. Errors are surfaced once for user
//! display; nothing is retried.

use crate::board::{
    BoardController, BoardError, DropAction, DropZone, StagedCompletion, StagedUndo,
};
use crate::task::{
    domain::{ActiveStatus, Quadrant, Task, TaskId},
    ports::{IdentityProvider, TaskRepository},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService},
};
use mockable::Clock;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced to the interaction surface for user display.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A mutation could not be staged against the local board state.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The lifecycle service rejected the mutation.
    #[error(transparent)]
    Service(#[from] TaskLifecycleError),

    /// The service did not respond in time; the optimistic change was
    /// rolled back as if the call had failed.
    #[error("the board service did not respond within {0:?}")]
    TimedOut(Duration),
}

/// Session tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long to wait for a service call before rolling back.
    pub remote_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            remote_timeout: Duration::from_secs(10),
        }
    }
}

/// One authenticated board session: local state plus its remote service.
pub struct BoardSession<R, I, C>
where
    R: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    controller: BoardController,
    service: TaskLifecycleService<R, I, C>,
    config: SessionConfig,
    pending_allocation: Option<TaskId>,
}

impl<R, I, C> BoardSession<R, I, C>
where
    R: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Starts a session by loading the caller's tasks from the service.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Service`] when the caller cannot be
    /// resolved. A store failure on the initial read degrades to an empty
    /// board, mirroring the service's lenient read path.
    pub async fn start(
        service: TaskLifecycleService<R, I, C>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let tasks = service.list_tasks().await?;
        Ok(Self {
            controller: BoardController::new(tasks),
            service,
            config,
            pending_allocation: None,
        })
    }

    /// Returns the current in-memory view, in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.controller.tasks()
    }

    /// Returns the tasks rendered in the given column.
    #[must_use]
    pub fn column(&self, zone: DropZone) -> Vec<&Task> {
        self.controller.column(zone)
    }

    /// Returns the task awaiting quadrant allocation, if any.
    #[must_use]
    pub const fn pending_allocation(&self) -> Option<TaskId> {
        self.pending_allocation
    }

    /// Reloads the board from the service, discarding local state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Service`] when the caller cannot be resolved
    /// and [`SessionError::TimedOut`] when the service does not respond.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let tasks =
            Self::with_timeout(self.config.remote_timeout, self.service.list_tasks()).await?;
        self.controller = BoardController::new(tasks);
        Ok(())
    }

    /// Creates a task into the intake column.
    ///
    /// The draft is validated first (no optimistic state on a bad title),
    /// then inserted optimistically under a provisional identifier while
    /// the persist call is in flight. On success the server row, with its
    /// store-assigned identifier, replaces the provisional entry and the
    /// task is marked as awaiting quadrant allocation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when validation, persistence, or the
    /// timeout fails; the board is rolled back in the latter two cases.
    pub async fn create(&mut self, request: CreateTaskRequest) -> Result<Task, SessionError> {
        let draft = self.service.draft_task(request).await?;
        let provisional = draft.clone().into_task(TaskId::new());
        let update = self.controller.stage_insert(provisional);
        match Self::with_timeout(self.config.remote_timeout, self.service.persist_task(&draft))
            .await
        {
            Ok(task) => {
                self.controller.commit(update, Some(task.clone()));
                self.pending_allocation = Some(task.id());
                Ok(task)
            }
            Err(err) => {
                self.controller.rollback(update);
                Err(err)
            }
        }
    }

    /// Allocates the pending task to the chosen quadrant.
    ///
    /// The pending marker is cleared only on success, so the allocation
    /// prompt can stay open after a failure.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoPendingAllocation`] when no task awaits
    /// allocation, otherwise whatever the status change surfaces.
    pub async fn allocate(&mut self, quadrant: Quadrant) -> Result<Task, SessionError> {
        let id = self
            .pending_allocation
            .ok_or(BoardError::NoPendingAllocation)?;
        let task = self.change_status(id, quadrant.as_active_status()).await?;
        self.pending_allocation = None;
        Ok(task)
    }

    /// Dismisses the allocation prompt, leaving the task unallocated.
    pub const fn dismiss_allocation(&mut self) {
        self.pending_allocation = None;
    }

    /// Moves a task to a new active status through the generic path.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when staging or the remote call fails; the
    /// board is rolled back on a remote failure or timeout.
    pub async fn change_status(
        &mut self,
        id: TaskId,
        status: ActiveStatus,
    ) -> Result<Task, SessionError> {
        let update = self.controller.stage_status_change(id, status)?;
        match Self::with_timeout(self.config.remote_timeout, self.service.set_status(id, status))
            .await
        {
            Ok(task) => {
                self.controller.commit(update, Some(task.clone()));
                Ok(task)
            }
            Err(err) => {
                self.controller.rollback(update);
                Err(err)
            }
        }
    }

    /// Resolves a drag-and-drop gesture against the fixed drop-zone table.
    ///
    /// A drop onto `completed` routes through the completion path with its
    /// drag-start snapshot; every other zone is a direct status write.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownDropTarget`] for an identifier outside
    /// the table, otherwise whatever the routed mutation surfaces.
    pub async fn drag_drop(&mut self, id: TaskId, target: &str) -> Result<Task, SessionError> {
        let zone = DropZone::from_id(target)
            .ok_or_else(|| BoardError::UnknownDropTarget(target.to_owned()))?;
        match zone.action() {
            DropAction::Move(status) => self.change_status(id, status).await,
            DropAction::Complete => self.complete(id).await,
        }
    }

    /// Completes a task, snapshotting its drag-start status.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when staging or the remote call fails; the
    /// board is rolled back on a remote failure or timeout.
    pub async fn complete(&mut self, id: TaskId) -> Result<Task, SessionError> {
        let StagedCompletion {
            update,
            prior_status,
        } = self.controller.stage_completion(id)?;
        match Self::with_timeout(
            self.config.remote_timeout,
            self.service.complete_task(id, prior_status),
        )
        .await
        {
            Ok(task) => {
                self.controller.commit(update, Some(task.clone()));
                Ok(task)
            }
            Err(err) => {
                self.controller.rollback(update);
                Err(err)
            }
        }
    }

    /// Restores a completed task to its snapshotted status.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when staging or the remote call fails; the
    /// board is rolled back on a remote failure or timeout.
    pub async fn undo(&mut self, id: TaskId) -> Result<Task, SessionError> {
        let StagedUndo {
            update,
            restored_status,
        } = self.controller.stage_undo(id)?;
        match Self::with_timeout(
            self.config.remote_timeout,
            self.service.undo_task(id, restored_status),
        )
        .await
        {
            Ok(task) => {
                self.controller.commit(update, Some(task.clone()));
                Ok(task)
            }
            Err(err) => {
                self.controller.rollback(update);
                Err(err)
            }
        }
    }

    /// Deletes a task, from any status.
    ///
    /// The entry disappears from the in-memory view immediately and comes
    /// back only if the remote call fails.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when staging or the remote call fails; the
    /// board is rolled back on a remote failure or timeout.
    pub async fn delete(&mut self, id: TaskId) -> Result<(), SessionError> {
        let update = self.controller.stage_removal(id)?;
        match Self::with_timeout(self.config.remote_timeout, self.service.delete_task(id)).await {
            Ok(()) => {
                self.controller.commit(update, None);
                if self.pending_allocation == Some(id) {
                    self.pending_allocation = None;
                }
                Ok(())
            }
            Err(err) => {
                self.controller.rollback(update);
                Err(err)
            }
        }
    }

    /// Awaits a service call, converting an overrun into the rollback path.
    async fn with_timeout<T>(
        timeout: Duration,
        call: impl Future<Output = TaskLifecycleResult<T>>,
    ) -> Result<T, SessionError> {
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result.map_err(SessionError::from),
            Err(elapsed) => {
                tracing::warn!(error = %elapsed, "board service call timed out");
                Err(SessionError::TimedOut(timeout))
            }
        }
    }
}
