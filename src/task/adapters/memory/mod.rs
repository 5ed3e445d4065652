//! In-memory adapters for tests and single-process sessions.

mod identity;
mod task;

pub use identity::FixedIdentityProvider;
pub use task::InMemoryTaskRepository;
