//! Unit tests for the board controller, drop resolution, and session.

mod controller_tests;
mod session_tests;
