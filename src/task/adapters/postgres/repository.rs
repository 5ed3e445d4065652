//! `PostgreSQL` repository implementation for board task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{ActiveStatus, NewTask, OwnerId, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list_by_owner(&self, owner: &OwnerId) -> TaskRepositoryResult<Vec<Task>> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_key))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(TaskRow::into_task).collect()
        })
        .await
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = NewTaskRow::from_new_task(task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row.into_task()
        })
        .await
    }

    async fn set_active_status(
        &self,
        id: TaskId,
        owner: &OwnerId,
        status: ActiveStatus,
    ) -> TaskRepositoryResult<Task> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner_key)),
            )
            .set((
                tasks::status.eq(status.as_str()),
                tasks::last_active_status.eq(None::<String>),
            ))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?
            .ok_or(TaskRepositoryError::NotFound(id))?;
            row.into_task()
        })
        .await
    }

    async fn mark_completed(
        &self,
        id: TaskId,
        owner: &OwnerId,
        last_active: ActiveStatus,
    ) -> TaskRepositoryResult<Task> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner_key)),
            )
            .set((
                tasks::status.eq(TaskStatus::Completed.as_str()),
                tasks::last_active_status.eq(Some(last_active.as_str())),
            ))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?
            .ok_or(TaskRepositoryError::NotFound(id))?;
            row.into_task()
        })
        .await
    }

    async fn delete(&self, id: TaskId, owner: &OwnerId) -> TaskRepositoryResult<()> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner_key)),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}
