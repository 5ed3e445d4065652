//! Client-side board core: state, drop resolution, and the session.
//!
//! The board holds one session's in-memory mirror of the task collection,
//! applies mutations optimistically, and reconciles each one with the
//! lifecycle service's response: commit the server row on success, restore
//! the pre-mutation snapshot on failure.

mod controller;
mod drop_zone;
mod session;

pub use controller::{
    BoardController, BoardError, OptimisticUpdate, StagedCompletion, StagedUndo,
};
pub use drop_zone::{DropAction, DropZone};
pub use session::{BoardSession, SessionConfig, SessionError};

#[cfg(test)]
mod tests;
