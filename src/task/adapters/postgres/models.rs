//! Diesel row models for board task persistence.

use super::schema::tasks;
use crate::task::{
    domain::{ActiveStatus, NewTask, OwnerId, PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepositoryError, TaskRepositoryResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: uuid::Uuid,
    /// Owning caller identity.
    pub owner_id: String,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Assignee name.
    pub delegated_to: String,
    /// Board status.
    pub status: String,
    /// Restore snapshot.
    pub last_active_status: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskRow {
    /// Maps a persisted row back into the domain aggregate.
    ///
    /// A row violating the completion invariant (or holding unparseable
    /// status text) is reported as a persistence error; corrupt rows must
    /// not surface as valid tasks.
    pub fn into_task(self) -> TaskRepositoryResult<Task> {
        let status = TaskStatus::try_from(self.status.as_str())
            .map_err(TaskRepositoryError::persistence)?;
        let last_active_status = self
            .last_active_status
            .as_deref()
            .map(ActiveStatus::try_from)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?;
        let owner_id = OwnerId::new(self.owner_id).map_err(TaskRepositoryError::persistence)?;
        let title = TaskTitle::new(self.title).map_err(TaskRepositoryError::persistence)?;

        let data = PersistedTaskData {
            id: TaskId::from_uuid(self.id),
            owner_id,
            title,
            description: self.description,
            deadline: self.deadline,
            delegated_to: self.delegated_to,
            status,
            last_active_status,
            created_at: self.created_at,
        };
        Task::from_persisted(data).map_err(TaskRepositoryError::persistence)
    }
}

/// Insert model for task records.
///
/// Carries no `id` (the store assigns one) and no `last_active_status`
/// (new tasks are never completed).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning caller identity.
    pub owner_id: String,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Assignee name.
    pub delegated_to: String,
    /// Board status, always `unallocated` at insert.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewTaskRow {
    /// Builds an insert row from a validated draft.
    #[must_use]
    pub fn from_new_task(task: &NewTask) -> Self {
        Self {
            owner_id: task.owner_id().as_str().to_owned(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            deadline: task.deadline(),
            delegated_to: task.delegated_to().to_owned(),
            status: TaskStatus::Active(ActiveStatus::Unallocated)
                .as_str()
                .to_owned(),
            created_at: task.created_at(),
        }
    }
}
