//! `PostgreSQL` adapters for board task persistence.

mod models;
mod repository;
mod schema;


pub use repository::{PostgresTaskRepository, TaskPgPool};
