//! Application services for board task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, MutationHook, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
