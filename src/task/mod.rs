//! Task lifecycle management for the four-quadrants board.
//!
//! This module implements the authoritative side of the board: creating
//! tasks into the `unallocated` intake column, moving them among the four
//! priority quadrants, completing them with a snapshot of the status they
//! came from, undoing completion, and deleting them. Every mutation is
//! scoped by owner identity. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
