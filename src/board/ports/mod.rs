//! Port contracts for the board context.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod repository;

pub use repository::{
    BoardRepository, ListRepository, RepositoryError, RepositoryResult, TaskRepository,
};
