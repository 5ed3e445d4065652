//! Domain model for the four-quadrants task lifecycle.
//!
//! The domain models task creation into the intake column, movement among
//! the priority quadrants, completion with a restore snapshot, and undo,
//! while keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseStatusError, TaskDomainError};
pub use ids::{OwnerId, TaskId, TaskTitle};
pub use status::{ActiveStatus, Quadrant, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task};
