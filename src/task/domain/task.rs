//! Task aggregate root and related lifecycle types.

use super::{ActiveStatus, OwnerId, TaskDomainError, TaskId, TaskStatus, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A validated task awaiting its store-assigned identifier.
///
/// Built by the lifecycle service from a creation request; the store adapter
/// turns it into a [`Task`] once a row identifier exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    owner_id: OwnerId,
    title: TaskTitle,
    description: String,
    deadline: Option<DateTime<Utc>>,
    delegated_to: String,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a new task draft owned by the given caller, timestamped now.
    #[must_use]
    pub fn new(owner_id: OwnerId, title: TaskTitle, clock: &impl Clock) -> Self {
        Self {
            owner_id,
            title,
            description: String::new(),
            deadline: None,
            delegated_to: String::new(),
            created_at: clock.utc(),
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

    /// Returns the owning caller identity.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the assignee name.
    #[must_use]
    pub fn delegated_to(&self) -> &str {
        &self.delegated_to
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materializes the draft into a task with the given identifier.
    ///
    /// Store adapters call this with the row identifier they assigned; the
    /// board controller calls it with a provisional identifier for
    /// optimistic inserts. Either way the task starts unallocated.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            deadline: self.deadline,
            delegated_to: self.delegated_to,
            status: TaskStatus::Active(ActiveStatus::Unallocated),
            last_active_status: None,
            created_at: self.created_at,
        }
    }
}

/// Task aggregate root.
///
/// Maintains the completion invariant: `status` is `completed` exactly when
/// `last_active_status` records the status the task came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    title: TaskTitle,
    description: String,
    deadline: Option<DateTime<Utc>>,
    delegated_to: String,
    status: TaskStatus,
    last_active_status: Option<ActiveStatus>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identity.
    pub owner_id: OwnerId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted assignee name.
    pub delegated_to: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted completion snapshot, if any.
    pub last_active_status: Option<ActiveStatus>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingCompletionSnapshot`] for a
    /// completed row without its snapshot, and
    /// [`TaskDomainError::UnexpectedCompletionSnapshot`] for an active row
    /// that still carries one.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        match (data.status, data.last_active_status) {
            (TaskStatus::Completed, None) => {
                Err(TaskDomainError::MissingCompletionSnapshot(data.id))
            }
            (TaskStatus::Active(_), Some(_)) => {
                Err(TaskDomainError::UnexpectedCompletionSnapshot(data.id))
            }
            _ => Ok(Self {
                id: data.id,
                owner_id: data.owner_id,
                title: data.title,
                description: data.description,
                deadline: data.deadline,
                delegated_to: data.delegated_to,
                status: data.status,
                last_active_status: data.last_active_status,
                created_at: data.created_at,
            }),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning caller identity.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the assignee name; empty means "not delegated".
    #[must_use]
    pub fn delegated_to(&self) -> &str {
        &self.delegated_to
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the completion snapshot, present only while completed.
    #[must_use]
    pub const fn last_active_status(&self) -> Option<ActiveStatus> {
        self.last_active_status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Moves the task to an active status, clearing any completion snapshot.
    ///
    /// This is the generic status path: allocation, re-drags between
    /// quadrants, and undo restoration all land here. Clearing the snapshot
    /// keeps the completion invariant intact for active rows.
    pub const fn set_active_status(&mut self, status: ActiveStatus) {
        self.status = TaskStatus::Active(status);
        self.last_active_status = None;
    }

    /// Completes the task, snapshotting the status it came from.
    ///
    /// Returns the snapshotted status so callers can forward it to the
    /// single-round-trip completion update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyCompleted`] when the task is
    /// already in the archive; only undo exits `completed`.
    pub const fn complete(&mut self) -> Result<ActiveStatus, TaskDomainError> {
        match self.status {
            TaskStatus::Active(prior) => {
                self.status = TaskStatus::Completed;
                self.last_active_status = Some(prior);
                Ok(prior)
            }
            TaskStatus::Completed => Err(TaskDomainError::AlreadyCompleted(self.id)),
        }
    }

    /// Records completion with a caller-supplied prior status.
    ///
    /// Store adapters use this to mirror the single-round-trip completion
    /// update, which trusts the client's last-known status rather than
    /// re-reading the row first.
    pub const fn complete_as(&mut self, last_active: ActiveStatus) {
        self.status = TaskStatus::Completed;
        self.last_active_status = Some(last_active);
    }

    /// Restores the task to its snapshotted status and clears the snapshot.
    ///
    /// Returns the restored status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotCompleted`] when the task is not in the
    /// archive, and [`TaskDomainError::MissingCompletionSnapshot`] if a
    /// completed task somehow lost its snapshot.
    pub fn undo(&mut self) -> Result<ActiveStatus, TaskDomainError> {
        if !self.status.is_completed() {
            return Err(TaskDomainError::NotCompleted(self.id));
        }
        let prior = self
            .last_active_status
            .take()
            .ok_or(TaskDomainError::MissingCompletionSnapshot(self.id))?;
        self.status = TaskStatus::Active(prior);
        Ok(prior)
    }
}
