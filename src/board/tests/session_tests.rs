//! Behavioural tests for the board session's optimistic protocol.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;
use std::time::Duration;

use crate::board::{BoardError, BoardSession, SessionConfig, SessionError};
use crate::task::{
    adapters::memory::{FixedIdentityProvider, InMemoryTaskRepository},
    domain::{ActiveStatus, NewTask, OwnerId, Quadrant, Task, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;

type MemorySession =
    BoardSession<InMemoryTaskRepository, FixedIdentityProvider, DefaultClock>;

fn owner() -> OwnerId {
    OwnerId::new("user_board").expect("valid owner")
}

fn service_over(
    repository: Arc<InMemoryTaskRepository>,
) -> TaskLifecycleService<InMemoryTaskRepository, FixedIdentityProvider, DefaultClock> {
    TaskLifecycleService::new(
        repository,
        Arc::new(FixedIdentityProvider::new(owner())),
        Arc::new(DefaultClock),
    )
}

async fn fresh_session() -> MemorySession {
    let service = service_over(Arc::new(InMemoryTaskRepository::new()));
    BoardSession::start(service, SessionConfig::default())
        .await
        .expect("session should start")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_allocate_complete_undo_delete_flows_through_the_board() {
    let mut session = fresh_session().await;

    let created = session
        .create(CreateTaskRequest::new("Draft memo").with_delegated_to(""))
        .await
        .expect("creation should succeed");
    assert_eq!(
        created.status(),
        TaskStatus::Active(ActiveStatus::Unallocated)
    );
    assert_eq!(created.last_active_status(), None);
    assert_eq!(session.pending_allocation(), Some(created.id()));

    let allocated = session
        .allocate(Quadrant::Q2)
        .await
        .expect("allocation should succeed");
    assert_eq!(allocated.status(), TaskStatus::Active(ActiveStatus::Q2));
    assert_eq!(session.pending_allocation(), None);

    let completed = session
        .drag_drop(created.id(), "completed")
        .await
        .expect("completion drop should succeed");
    assert_eq!(completed.status(), TaskStatus::Completed);
    assert_eq!(completed.last_active_status(), Some(ActiveStatus::Q2));

    let restored = session
        .undo(created.id())
        .await
        .expect("undo should succeed");
    assert_eq!(restored.status(), TaskStatus::Active(ActiveStatus::Q2));
    assert_eq!(restored.last_active_status(), None);

    session
        .delete(created.id())
        .await
        .expect("delete should succeed");
    assert!(session.tasks().is_empty());
    session.refresh().await.expect("refresh should succeed");
    assert!(session.tasks().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_adopt_the_store_assigned_identifier() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let mut session = BoardSession::start(service_over(Arc::clone(&repository)), SessionConfig::default())
        .await
        .expect("session should start");

    let created = session
        .create(CreateTaskRequest::new("Draft memo"))
        .await
        .expect("creation should succeed");

    let stored = repository
        .list_by_owner(&owner())
        .await
        .expect("listing should succeed");
    assert_eq!(stored, vec![created.clone()]);
    assert_eq!(session.tasks(), stored.as_slice());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allocation_prompt_can_be_dismissed() {
    let mut session = fresh_session().await;
    let created = session
        .create(CreateTaskRequest::new("Maybe later"))
        .await
        .expect("creation should succeed");

    session.dismiss_allocation();

    assert_eq!(session.pending_allocation(), None);
    let task = session
        .tasks()
        .iter()
        .find(|task| task.id() == created.id())
        .expect("task should stay on the board");
    assert_eq!(task.status(), TaskStatus::Active(ActiveStatus::Unallocated));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allocating_without_a_pending_task_is_rejected() {
    let mut session = fresh_session().await;

    let result = session.allocate(Quadrant::Q1).await;

    assert!(matches!(
        result,
        Err(SessionError::Board(BoardError::NoPendingAllocation))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_drop_targets_leave_the_board_unchanged() {
    let mut session = fresh_session().await;
    let created = session
        .create(CreateTaskRequest::new("Draft memo"))
        .await
        .expect("creation should succeed");
    let before = session.tasks().to_vec();

    let result = session.drag_drop(created.id(), "q5").await;

    assert!(matches!(
        result,
        Err(SessionError::Board(BoardError::UnknownDropTarget(ref id))) if id == "q5"
    ));
    assert_eq!(session.tasks(), before.as_slice());
}

/// Repository whose mutations fail after a successful initial listing.
#[derive(Debug)]
struct FlakyRepository {
    seeded: Task,
}

impl FlakyRepository {
    fn outage<T>() -> TaskRepositoryResult<T> {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "connection reset",
        )))
    }
}

#[async_trait]
impl TaskRepository for FlakyRepository {
    async fn list_by_owner(&self, _owner: &OwnerId) -> TaskRepositoryResult<Vec<Task>> {
        Ok(vec![self.seeded.clone()])
    }

    async fn insert(&self, _task: &NewTask) -> TaskRepositoryResult<Task> {
        Self::outage()
    }

    async fn set_active_status(
        &self,
        _id: TaskId,
        _owner: &OwnerId,
        _status: ActiveStatus,
    ) -> TaskRepositoryResult<Task> {
        Self::outage()
    }

    async fn mark_completed(
        &self,
        _id: TaskId,
        _owner: &OwnerId,
        _last_active: ActiveStatus,
    ) -> TaskRepositoryResult<Task> {
        Self::outage()
    }

    async fn delete(&self, _id: TaskId, _owner: &OwnerId) -> TaskRepositoryResult<()> {
        Self::outage()
    }
}

fn seeded_task(status: ActiveStatus) -> Task {
    let mut task = NewTask::new(
        owner(),
        TaskTitle::new("Seeded").expect("valid title"),
        &DefaultClock,
    )
    .into_task(TaskId::new());
    task.set_active_status(status);
    task
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_mutations_roll_the_board_back() {
    let seeded = seeded_task(ActiveStatus::Q1);
    let service = TaskLifecycleService::new(
        Arc::new(FlakyRepository {
            seeded: seeded.clone(),
        }),
        Arc::new(FixedIdentityProvider::new(owner())),
        Arc::new(DefaultClock),
    );
    let mut session = BoardSession::start(service, SessionConfig::default())
        .await
        .expect("session should start");

    let result = session.delete(seeded.id()).await;

    assert!(matches!(result, Err(SessionError::Service(_))));
    assert_eq!(session.tasks(), [seeded].as_slice());
}

/// Repository whose delete call never resolves.
#[derive(Debug)]
struct HangingRepository {
    seeded: Task,
}

#[async_trait]
impl TaskRepository for HangingRepository {
    async fn list_by_owner(&self, _owner: &OwnerId) -> TaskRepositoryResult<Vec<Task>> {
        Ok(vec![self.seeded.clone()])
    }

    async fn insert(&self, _task: &NewTask) -> TaskRepositoryResult<Task> {
        std::future::pending().await
    }

    async fn set_active_status(
        &self,
        _id: TaskId,
        _owner: &OwnerId,
        _status: ActiveStatus,
    ) -> TaskRepositoryResult<Task> {
        std::future::pending().await
    }

    async fn mark_completed(
        &self,
        _id: TaskId,
        _owner: &OwnerId,
        _last_active: ActiveStatus,
    ) -> TaskRepositoryResult<Task> {
        std::future::pending().await
    }

    async fn delete(&self, _id: TaskId, _owner: &OwnerId) -> TaskRepositoryResult<()> {
        std::future::pending().await
    }
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn hung_calls_time_out_and_roll_back() {
    let seeded = seeded_task(ActiveStatus::Q3);
    let service = TaskLifecycleService::new(
        Arc::new(HangingRepository {
            seeded: seeded.clone(),
        }),
        Arc::new(FixedIdentityProvider::new(owner())),
        Arc::new(DefaultClock),
    );
    let config = SessionConfig {
        remote_timeout: Duration::from_millis(250),
    };
    let mut session = BoardSession::start(service, config)
        .await
        .expect("session should start");

    let result = session.drag_drop(seeded.id(), "completed").await;

    assert!(matches!(result, Err(SessionError::TimedOut(_))));
    assert_eq!(session.tasks(), [seeded].as_slice());
}
