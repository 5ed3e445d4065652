//! Port contracts for the task lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod identity;
pub mod repository;

pub use identity::{IdentityError, IdentityProvider, IdentityResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
