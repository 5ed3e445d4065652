//! Tests for optimistic staging, commit, and rollback on the board.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::board::{BoardController, BoardError, DropZone};
use crate::task::domain::{
    ActiveStatus, NewTask, OwnerId, Task, TaskDomainError, TaskId, TaskStatus, TaskTitle,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

fn task_named(title: &str, status: ActiveStatus) -> Task {
    let owner = OwnerId::new("user_board").expect("valid owner");
    let mut task = NewTask::new(owner, TaskTitle::new(title).expect("valid title"), &DefaultClock)
        .into_task(TaskId::new());
    task.set_active_status(status);
    task
}

/// Board holding `[A(q1), B(q2)]`.
#[fixture]
fn board() -> BoardController {
    BoardController::new(vec![
        task_named("A", ActiveStatus::Q1),
        task_named("B", ActiveStatus::Q2),
    ])
}

fn id_of(board: &BoardController, title: &str) -> TaskId {
    board
        .tasks()
        .iter()
        .find(|task| task.title().as_str() == title)
        .map(Task::id)
        .expect("board should hold the task")
}

#[rstest]
fn columns_filter_by_rendered_status(board: BoardController) {
    assert_eq!(board.column(DropZone::Q1).len(), 1);
    assert_eq!(board.column(DropZone::Q2).len(), 1);
    assert!(board.column(DropZone::Completed).is_empty());
}

#[rstest]
fn staged_status_change_is_visible_immediately(mut board: BoardController) {
    let id = id_of(&board, "A");

    let update = board
        .stage_status_change(id, ActiveStatus::Q4)
        .expect("staging should succeed");

    let staged = board.find(id).expect("task should remain on the board");
    assert_eq!(staged.status(), TaskStatus::Active(ActiveStatus::Q4));
    board.rollback(update);
    let reverted = board.find(id).expect("task should remain on the board");
    assert_eq!(reverted.status(), TaskStatus::Active(ActiveStatus::Q1));
}

#[rstest]
fn commit_adopts_the_server_representation(mut board: BoardController) {
    let id = id_of(&board, "A");
    let update = board
        .stage_status_change(id, ActiveStatus::Q4)
        .expect("staging should succeed");

    // Server rows win over the optimistic guess.
    let mut server_row = board.find(id).expect("task on board").clone();
    server_row.set_active_status(ActiveStatus::Q3);
    board.commit(update, Some(server_row.clone()));

    assert_eq!(board.find(id), Some(&server_row));
}

#[rstest]
fn staged_removal_is_optimistic_and_reversible(mut board: BoardController) {
    let id_a = id_of(&board, "A");
    let id_b = id_of(&board, "B");

    let update = board.stage_removal(id_a).expect("staging should succeed");
    assert!(board.find(id_a).is_none());
    assert!(board.find(id_b).is_some());
    assert_eq!(board.tasks().len(), 1);

    board.rollback(update);
    assert_eq!(board.tasks().len(), 2);
    assert!(board.find(id_a).is_some());
}

#[rstest]
fn staged_completion_snapshots_the_drag_start_status(mut board: BoardController) {
    let id = id_of(&board, "B");

    let staged = board.stage_completion(id).expect("staging should succeed");

    assert_eq!(staged.prior_status, ActiveStatus::Q2);
    let task = board.find(id).expect("task should remain on the board");
    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.last_active_status(), Some(ActiveStatus::Q2));
}

#[rstest]
fn completed_tasks_cannot_be_dragged_to_a_quadrant(mut board: BoardController) {
    let id = id_of(&board, "A");
    let staged = board.stage_completion(id).expect("staging should succeed");
    board.commit(staged.update, None);

    let result = board.stage_status_change(id, ActiveStatus::Q2);

    assert_eq!(result.err(), Some(BoardError::CompletedTaskImmovable(id)));
}

#[rstest]
fn completing_a_completed_task_is_rejected(mut board: BoardController) {
    let id = id_of(&board, "A");
    let staged = board.stage_completion(id).expect("staging should succeed");
    board.commit(staged.update, None);

    let result = board.stage_completion(id);

    assert_eq!(
        result.err(),
        Some(BoardError::Lifecycle(TaskDomainError::AlreadyCompleted(id)))
    );
}

#[rstest]
fn staged_undo_restores_the_snapshot(mut board: BoardController) {
    let id = id_of(&board, "B");
    let completion = board.stage_completion(id).expect("staging should succeed");
    board.commit(completion.update, None);

    let staged = board.stage_undo(id).expect("undo staging should succeed");

    assert_eq!(staged.restored_status, ActiveStatus::Q2);
    let task = board.find(id).expect("task should remain on the board");
    assert_eq!(task.status(), TaskStatus::Active(ActiveStatus::Q2));
    assert_eq!(task.last_active_status(), None);
}

#[rstest]
fn undoing_an_active_task_is_rejected(mut board: BoardController) {
    let id = id_of(&board, "A");

    let result = board.stage_undo(id);

    assert_eq!(
        result.err(),
        Some(BoardError::Lifecycle(TaskDomainError::NotCompleted(id)))
    );
}

#[rstest]
fn provisional_inserts_are_replaced_by_the_server_row(mut board: BoardController) {
    let provisional = task_named("C", ActiveStatus::Unallocated);
    let provisional_id = provisional.id();
    let update = board.stage_insert(provisional);
    assert!(board.find(provisional_id).is_some());

    let server_row = task_named("C", ActiveStatus::Unallocated);
    let server_id = server_row.id();
    board.commit(update, Some(server_row));

    assert!(board.find(provisional_id).is_none());
    assert!(board.find(server_id).is_some());
    assert_eq!(board.tasks().len(), 3);
}

#[rstest]
fn mutating_an_unknown_task_is_rejected(mut board: BoardController) {
    let ghost = TaskId::new();

    assert_eq!(
        board.stage_status_change(ghost, ActiveStatus::Q1).err(),
        Some(BoardError::UnknownTask(ghost))
    );
    assert_eq!(
        board.stage_removal(ghost).err(),
        Some(BoardError::UnknownTask(ghost))
    );
}
