//! Identity provider port.
//!
//! The core consumes a single capability from the external identity
//! provider: resolve the current caller. Token formats, session cookies,
//! and provider protocols stay outside this boundary.

use crate::task::domain::OwnerId;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for identity resolution.
pub type IdentityResult = Result<OwnerId, IdentityError>;

/// Capability to resolve the current caller identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the current caller.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] when no caller identity
    /// can be resolved.
    async fn current_caller(&self) -> IdentityResult;
}

/// Errors returned by identity providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No caller identity could be resolved.
    #[error("no authenticated caller identity")]
    Unauthenticated,
}
