//! Domain model for the kanban board context.
//!
//! The board domain models boards, their ordered lists, and the lists'
//! ordered tasks, together with the sparse integer position scheme that
//! keeps sibling ordering consistent under drag-reorder and cross-list
//! movement. All infrastructure concerns stay outside the domain boundary.

mod board;
mod error;
mod ids;
mod list;
mod ordering;
mod task;

pub use board::{Board, PersistedBoardData};
pub use error::BoardDomainError;
pub use ids::{BoardId, ListId, TaskId, Title, UserId};
pub use list::{List, ListState, PersistedListData};
pub use ordering::{Position, PositionScheme, ReorderError, ReorderPlan};
pub use task::{PersistedTaskData, Task};
