//! the4Quadrants: a single-user Kanban board core built on the
//! urgent/important matrix.
//!
//! Tasks enter an `unallocated` intake column, move among four priority
//! quadrants, and can be completed, undone, and deleted. This crate provides
//! the board's core: the authoritative lifecycle service enforcing ownership
//! and status invariants, and the session-scoped board controller
//! implementing the optimistic-update / reconciliation protocol.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, identity)
//!
//! # Modules
//!
//! - [`task`]: task domain, lifecycle service, and store adapters
//! - [`board`]: board state, drop-zone resolution, and the session driving
//!   optimistic mutations against the lifecycle service

pub mod board;
pub mod task;
