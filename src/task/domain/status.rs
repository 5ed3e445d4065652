//! Board status values and the active/completed distinction.

use super::ParseStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statuses a task can hold while it remains on the active board.
///
/// These are the five values a completion snapshot may record; `completed`
/// itself is deliberately unrepresentable here, which makes the invariant
/// "a snapshot always names a non-completed status" structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveStatus {
    /// Newly created, awaiting quadrant allocation.
    Unallocated,
    /// Urgent and important.
    Q1,
    /// Important but not urgent.
    Q2,
    /// Urgent but not important.
    Q3,
    /// Neither urgent nor important.
    Q4,
}

impl ActiveStatus {
    /// All active statuses in board order.
    pub const ALL: [Self; 5] = [Self::Unallocated, Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unallocated => "unallocated",
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
        }
    }
}

impl TryFrom<&str> for ActiveStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "unallocated" => Ok(Self::Unallocated),
            "q1" => Ok(Self::Q1),
            "q2" => Ok(Self::Q2),
            "q3" => Ok(Self::Q3),
            "q4" => Ok(Self::Q4),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the four priority quadrants.
///
/// Allocation assigns a freshly created task to a quadrant; `unallocated`
/// is not a valid allocation target, so the quadrant picker works with this
/// narrower type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Urgent and important.
    Q1,
    /// Important but not urgent.
    Q2,
    /// Urgent but not important.
    Q3,
    /// Neither urgent nor important.
    Q4,
}

impl Quadrant {
    /// All quadrants in board order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Returns the equivalent active status.
    #[must_use]
    pub const fn as_active_status(self) -> ActiveStatus {
        match self {
            Self::Q1 => ActiveStatus::Q1,
            Self::Q2 => ActiveStatus::Q2,
            Self::Q3 => ActiveStatus::Q3,
            Self::Q4 => ActiveStatus::Q4,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_active_status())
    }
}

/// Full task status as stored and rendered.
///
/// `Completed` tasks live in the archive column; everything else is an
/// [`ActiveStatus`] somewhere on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TaskStatus {
    /// Task is on the active board.
    Active(ActiveStatus),
    /// Task has been completed and archived.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active(status) => status.as_str(),
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when the task sits in the completed archive.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the active status when the task is on the active board.
    #[must_use]
    pub const fn as_active(self) -> Option<ActiveStatus> {
        match self {
            Self::Active(status) => Some(status),
            Self::Completed => None,
        }
    }
}

impl From<ActiveStatus> for TaskStatus {
    fn from(status: ActiveStatus) -> Self {
        Self::Active(status)
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized == "completed" {
            return Ok(Self::Completed);
        }
        ActiveStatus::try_from(value).map(Self::Active)
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
