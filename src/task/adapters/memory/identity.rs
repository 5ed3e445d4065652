//! Fixed identity provider for tests and single-user sessions.

use async_trait::async_trait;

use crate::task::{
    domain::OwnerId,
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

/// Identity provider that always resolves to one caller, or to nobody.
///
/// Stands in for the external provider wherever a real session is not
/// available: unit tests, the behavioural suites, and local tooling.
#[derive(Debug, Clone)]
pub struct FixedIdentityProvider {
    caller: Option<OwnerId>,
}

impl FixedIdentityProvider {
    /// Creates a provider resolving every call to the given identity.
    #[must_use]
    pub const fn new(caller: OwnerId) -> Self {
        Self {
            caller: Some(caller),
        }
    }

    /// Creates a provider that never resolves a caller.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { caller: None }
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentityProvider {
    async fn current_caller(&self) -> IdentityResult {
        self.caller.clone().ok_or(IdentityError::Unauthenticated)
    }
}
