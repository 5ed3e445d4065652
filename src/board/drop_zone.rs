//! Drop-zone enumeration and drag-target resolution.
//!
//! The board's columns are a fixed set of drop targets mapping 1:1 to the
//! active statuses, plus the special `completed` zone that routes through
//! the snapshotting completion path. The mapping is an explicit table so a
//! mistyped column identifier fails loudly instead of becoming a bogus
//! status write.

use crate::task::domain::{ActiveStatus, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A droppable board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    /// The intake column.
    Unallocated,
    /// Urgent and important.
    Q1,
    /// Important but not urgent.
    Q2,
    /// Urgent but not important.
    Q3,
    /// Neither urgent nor important.
    Q4,
    /// The completed archive; dropping here completes the task.
    Completed,
}

/// What a drop onto a zone means for the dragged task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    /// Write the new active status through the generic status path.
    Move(ActiveStatus),
    /// Route through the completion path, snapshotting the current status.
    Complete,
}

impl DropZone {
    /// All drop zones in board order.
    pub const ALL: [Self; 6] = [
        Self::Unallocated,
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Completed,
    ];

    /// Resolves a droppable column identifier from the interaction surface.
    ///
    /// Returns `None` for identifiers outside the fixed table.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "unallocated" => Some(Self::Unallocated),
            "q1" => Some(Self::Q1),
            "q2" => Some(Self::Q2),
            "q3" => Some(Self::Q3),
            "q4" => Some(Self::Q4),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns the droppable column identifier.
    #[must_use]
    pub const fn as_id(self) -> &'static str {
        match self {
            Self::Unallocated => "unallocated",
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
            Self::Completed => "completed",
        }
    }

    /// Returns the action a drop onto this zone triggers.
    #[must_use]
    pub const fn action(self) -> DropAction {
        match self {
            Self::Unallocated => DropAction::Move(ActiveStatus::Unallocated),
            Self::Q1 => DropAction::Move(ActiveStatus::Q1),
            Self::Q2 => DropAction::Move(ActiveStatus::Q2),
            Self::Q3 => DropAction::Move(ActiveStatus::Q3),
            Self::Q4 => DropAction::Move(ActiveStatus::Q4),
            Self::Completed => DropAction::Complete,
        }
    }

    /// Returns the status rendered in this column.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self.action() {
            DropAction::Move(status) => TaskStatus::Active(status),
            DropAction::Complete => TaskStatus::Completed,
        }
    }
}

impl From<ActiveStatus> for DropZone {
    fn from(status: ActiveStatus) -> Self {
        match status {
            ActiveStatus::Unallocated => Self::Unallocated,
            ActiveStatus::Q1 => Self::Q1,
            ActiveStatus::Q2 => Self::Q2,
            ActiveStatus::Q3 => Self::Q3,
            ActiveStatus::Q4 => Self::Q4,
        }
    }
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_id())
    }
}
