//! Session-scoped board state with optimistic mutations.
//!
//! The controller mirrors the lifecycle service's task collection for one
//! authenticated session. Mutations are staged synchronously so the
//! interaction surface reflects them on the same render pass; each staging
//! call returns an [`OptimisticUpdate`] token holding the pre-mutation
//! snapshot, which the caller later resolves with [`BoardController::commit`]
//! or [`BoardController::rollback`] once the remote call settles.

use crate::board::DropZone;
use crate::task::domain::{ActiveStatus, Task, TaskDomainError, TaskId};
use thiserror::Error;

/// Errors raised while staging board mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The mutation targets a task the board does not hold.
    #[error("no task with id {0} on the board")]
    UnknownTask(TaskId),

    /// A completed task was dragged; only undo moves it back to the board.
    #[error("task {0} is completed; only undo moves it back to the board")]
    CompletedTaskImmovable(TaskId),

    /// The drop target is outside the fixed column table.
    #[error("'{0}' is not a droppable board column")]
    UnknownDropTarget(String),

    /// No task is awaiting quadrant allocation.
    #[error("no task is awaiting quadrant allocation")]
    NoPendingAllocation,

    /// The staged mutation violated a task lifecycle rule.
    #[error(transparent)]
    Lifecycle(#[from] TaskDomainError),
}

/// Token for one staged mutation: the pre-mutation snapshot plus the
/// identifier of the task the mutation touched.
///
/// Dropping the token without committing or rolling back abandons the
/// snapshot and leaves the optimistic state in place, so staging methods
/// are `#[must_use]`.
#[derive(Debug, Clone)]
pub struct OptimisticUpdate {
    snapshot: Vec<Task>,
    target: TaskId,
}

impl OptimisticUpdate {
    /// Returns the identifier of the task this update staged.
    #[must_use]
    pub const fn target(&self) -> TaskId {
        self.target
    }
}

/// A staged completion: the update token plus the status snapshotted at
/// drag-start, which the remote completion call must record.
#[derive(Debug, Clone)]
pub struct StagedCompletion {
    /// Token to commit or roll back.
    pub update: OptimisticUpdate,
    /// Status the task held when completion was staged.
    pub prior_status: ActiveStatus,
}

/// A staged undo: the update token plus the status the task was restored
/// to, which the remote undo call must write.
#[derive(Debug, Clone)]
pub struct StagedUndo {
    /// Token to commit or roll back.
    pub update: OptimisticUpdate,
    /// Status the snapshot restored.
    pub restored_status: ActiveStatus,
}

/// In-memory board state for one session.
#[derive(Debug, Clone, Default)]
pub struct BoardController {
    tasks: Vec<Task>,
}

impl BoardController {
    /// Creates a controller mirroring the given task collection.
    #[must_use]
    pub const fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Returns the current in-memory view, in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with the given identifier, if the board holds it.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the tasks rendered in the given column, in collection order.
    #[must_use]
    pub fn column(&self, zone: DropZone) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status() == zone.status())
            .collect()
    }

    /// Stages the insertion of a freshly created task.
    ///
    /// The task carries a provisional identifier; committing with the
    /// server's representation replaces it with the store-assigned one.
    pub fn stage_insert(&mut self, task: Task) -> OptimisticUpdate {
        let snapshot = self.tasks.clone();
        let target = task.id();
        self.tasks.push(task);
        OptimisticUpdate { snapshot, target }
    }

    /// Stages a move to a new active status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the board does not hold the
    /// task and [`BoardError::CompletedTaskImmovable`] when it is completed;
    /// completed tasks leave the archive only through undo.
    pub fn stage_status_change(
        &mut self,
        id: TaskId,
        status: ActiveStatus,
    ) -> Result<OptimisticUpdate, BoardError> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(BoardError::UnknownTask(id))?;
        if self
            .tasks
            .get(position)
            .is_some_and(|task| task.status().is_completed())
        {
            return Err(BoardError::CompletedTaskImmovable(id));
        }
        let snapshot = self.tasks.clone();
        if let Some(task) = self.tasks.get_mut(position) {
            task.set_active_status(status);
        }
        Ok(OptimisticUpdate {
            snapshot,
            target: id,
        })
    }

    /// Stages a completion, capturing the task's current status as the
    /// restore snapshot at drag-start time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the board does not hold the
    /// task and a lifecycle error when it is already completed.
    pub fn stage_completion(&mut self, id: TaskId) -> Result<StagedCompletion, BoardError> {
        let snapshot = self.tasks.clone();
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(BoardError::UnknownTask(id))?;
        let prior_status = task.complete()?;
        Ok(StagedCompletion {
            update: OptimisticUpdate {
                snapshot,
                target: id,
            },
            prior_status,
        })
    }

    /// Stages an undo, restoring the snapshotted status and clearing it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the board does not hold the
    /// task and a lifecycle error when it is not completed.
    pub fn stage_undo(&mut self, id: TaskId) -> Result<StagedUndo, BoardError> {
        let snapshot = self.tasks.clone();
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(BoardError::UnknownTask(id))?;
        let restored_status = task.undo()?;
        Ok(StagedUndo {
            update: OptimisticUpdate {
                snapshot,
                target: id,
            },
            restored_status,
        })
    }

    /// Stages a removal.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the board does not hold the
    /// task.
    pub fn stage_removal(&mut self, id: TaskId) -> Result<OptimisticUpdate, BoardError> {
        if self.find(id).is_none() {
            return Err(BoardError::UnknownTask(id));
        }
        let snapshot = self.tasks.clone();
        self.tasks.retain(|task| task.id() != id);
        Ok(OptimisticUpdate {
            snapshot,
            target: id,
        })
    }

    /// Accepts the remote outcome for a staged mutation.
    ///
    /// When the service returned a task representation, it becomes the
    /// source of truth for the staged entry: server-assigned fields win,
    /// including the identifier of a provisionally inserted task. Removals
    /// commit with `None`.
    pub fn commit(&mut self, update: OptimisticUpdate, authoritative: Option<Task>) {
        let OptimisticUpdate { target, .. } = update;
        if let Some(replacement) = authoritative {
            if let Some(slot) = self.tasks.iter_mut().find(|task| task.id() == target) {
                *slot = replacement;
            }
        }
    }

    /// Restores the pre-mutation snapshot after a failed remote call.
    pub fn rollback(&mut self, update: OptimisticUpdate) {
        self.tasks = update.snapshot;
    }
}
