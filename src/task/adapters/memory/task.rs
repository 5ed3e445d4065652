//! In-memory task repository for tests and single-process sessions.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ActiveStatus, NewTask, OwnerId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Rows keep insertion order, which doubles as the store-native listing
/// order. Identifiers are assigned at insert, matching the store-assigned-id
/// contract of the port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(message: String) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(message))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_by_owner(&self, owner: &OwnerId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| lock_poisoned(err.to_string()))?;
        Ok(state
            .iter()
            .filter(|task| task.owner_id() == owner)
            .cloned()
            .collect())
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(err.to_string()))?;
        let persisted = task.clone().into_task(TaskId::new());
        state.push(persisted.clone());
        Ok(persisted)
    }

    async fn set_active_status(
        &self,
        id: TaskId,
        owner: &OwnerId,
        status: ActiveStatus,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(err.to_string()))?;
        let task = state
            .iter_mut()
            .find(|task| task.id() == id && task.owner_id() == owner)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.set_active_status(status);
        Ok(task.clone())
    }

    async fn mark_completed(
        &self,
        id: TaskId,
        owner: &OwnerId,
        last_active: ActiveStatus,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(err.to_string()))?;
        let task = state
            .iter_mut()
            .find(|task| task.id() == id && task.owner_id() == owner)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.complete_as(last_active);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId, owner: &OwnerId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(err.to_string()))?;
        let before = state.len();
        state.retain(|task| !(task.id() == id && task.owner_id() == owner));
        if state.len() == before {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
