//! Service layer for board task lifecycle operations.
//!
//! Every operation resolves the caller identity first; an unauthenticated
//! caller fails before any store access. Store failures never escape as
//! panics: each operation returns a tagged result.

use crate::task::{
    domain::{ActiveStatus, NewTask, OwnerId, Task, TaskDomainError, TaskId, TaskTitle},
    ports::{
        IdentityError, IdentityProvider, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a board task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    deadline: Option<DateTime<Utc>>,
    delegated_to: String,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            deadline: None,
            delegated_to: String::new(),
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the optional deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the assignee name; an empty string means "not delegated".
    #[must_use]
    pub fn with_delegated_to(mut self, delegated_to: impl Into<String>) -> Self {
        self.delegated_to = delegated_to.into();
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// No caller identity could be resolved.
    #[error("no authenticated caller identity")]
    Unauthenticated,

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The mutation matched no row owned by the caller.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The underlying store failed.
    #[error("task store failure: {0}")]
    Store(TaskRepositoryError),
}

impl From<IdentityError> for TaskLifecycleError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Unauthenticated => Self::Unauthenticated,
        }
    }
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::Persistence(_) => Self::Store(err),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Hook invoked after every successful mutation.
///
/// The presentation layer registers its cache invalidation here; the
/// default is a no-op.
pub type MutationHook = Arc<dyn Fn() + Send + Sync>;

/// Authoritative task lifecycle service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, I, C>
where
    R: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    identity: Arc<I>,
    clock: Arc<C>,
    on_mutation: MutationHook,
}

impl<R, I, C> TaskLifecycleService<R, I, C>
where
    R: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with a no-op mutation hook.
    #[must_use]
    pub fn new(repository: Arc<R>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            repository,
            identity,
            clock,
            on_mutation: Arc::new(|| ()),
        }
    }

    /// Registers the hook invoked after each successful mutation.
    #[must_use]
    pub fn with_mutation_hook(mut self, hook: MutationHook) -> Self {
        self.on_mutation = hook;
        self
    }

    /// Resolves the current caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Unauthenticated`] when no caller
    /// identity can be resolved.
    pub async fn caller(&self) -> TaskLifecycleResult<OwnerId> {
        Ok(self.identity.current_caller().await?)
    }

    /// Returns all tasks owned by the caller, in store-native order.
    ///
    /// The read path degrades gracefully: a store failure yields an empty
    /// list (logged at WARN) so the board can still render.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Unauthenticated`] when no caller
    /// identity can be resolved.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        let owner = self.caller().await?;
        let result: TaskRepositoryResult<Vec<Task>> =
            self.repository.list_by_owner(&owner).await;
        match result {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                tracing::warn!(error = %err, "task list fetch failed, rendering empty board");
                Ok(Vec::new())
            }
        }
    }

    /// Validates a creation request into a draft without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Unauthenticated`] without a caller and
    /// [`TaskLifecycleError::Validation`] when the title is empty.
    pub async fn draft_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<NewTask> {
        let owner = self.caller().await?;
        let title = TaskTitle::new(request.title)?;
        let mut draft = NewTask::new(owner, title, &*self.clock)
            .with_description(request.description)
            .with_delegated_to(request.delegated_to);
        if let Some(deadline) = request.deadline {
            draft = draft.with_deadline(deadline);
        }
        Ok(draft)
    }

    /// Persists a validated draft and returns the stored task with its
    /// store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the insert fails.
    pub async fn persist_task(&self, draft: &NewTask) -> TaskLifecycleResult<Task> {
        let task = self.repository.insert(draft).await?;
        (self.on_mutation)();
        Ok(task)
    }

    /// Creates a task into the `unallocated` intake column.
    ///
    /// Equivalent to [`Self::draft_task`] followed by
    /// [`Self::persist_task`]; the board session uses the two halves
    /// separately so it can stage the optimistic insert in between.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when identity resolution, title
    /// validation, or persistence fails. An invalid title performs no store
    /// write.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let draft = self.draft_task(request).await?;
        self.persist_task(&draft).await
    }

    /// Moves the caller's task to a new active status.
    ///
    /// Completion is not reachable through this path; it always goes through
    /// [`Self::complete_task`] so the restore snapshot is recorded. Any
    /// stale snapshot on the row is cleared by the same update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no row matches the
    /// caller and identifier.
    pub async fn set_status(
        &self,
        id: TaskId,
        status: ActiveStatus,
    ) -> TaskLifecycleResult<Task> {
        let owner = self.caller().await?;
        let task = self.repository.set_active_status(id, &owner, status).await?;
        (self.on_mutation)();
        Ok(task)
    }

    /// Completes the caller's task, recording `current_status` as the
    /// restore snapshot in a single update.
    ///
    /// `current_status` is the client's last-known status, not re-read from
    /// the store: a deliberate single-round-trip trade-off. A concurrent
    /// status change between the client read and this call is overwritten
    /// silently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no row matches the
    /// caller and identifier.
    pub async fn complete_task(
        &self,
        id: TaskId,
        current_status: ActiveStatus,
    ) -> TaskLifecycleResult<Task> {
        let owner = self.caller().await?;
        let task = self
            .repository
            .mark_completed(id, &owner, current_status)
            .await?;
        (self.on_mutation)();
        Ok(task)
    }

    /// Restores a completed task to `previous_status` and clears the
    /// snapshot in a single update.
    ///
    /// Shares the caller-supplied-status trade-off of
    /// [`Self::complete_task`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no row matches the
    /// caller and identifier.
    pub async fn undo_task(
        &self,
        id: TaskId,
        previous_status: ActiveStatus,
    ) -> TaskLifecycleResult<Task> {
        let owner = self.caller().await?;
        let task = self
            .repository
            .set_active_status(id, &owner, previous_status)
            .await?;
        (self.on_mutation)();
        Ok(task)
    }

    /// Deletes the caller's task, from any status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no row matches,
    /// including a repeat delete.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let owner = self.caller().await?;
        self.repository.delete(id, &owner).await?;
        (self.on_mutation)();
        Ok(())
    }
}
