//! Repository ports for board, list, and task persistence.
//!
//! Reorder, move, and delete contracts are atomic: an implementation applies
//! the whole write-set or none of it, and serializes competing calls against
//! the same container (per-container mutual exclusion). The canonical
//! read-back of a reorder is sequenced after every write of that call.

use crate::board::domain::{Board, BoardId, List, ListId, Position, Task, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Board persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a new board.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateBoard`] when the identifier
    /// already exists.
    async fn store(&self, board: &Board) -> RepositoryResult<()>;

    /// Finds a board by identifier.
    ///
    /// Returns `None` when the board does not exist.
    async fn find_by_id(&self, id: BoardId) -> RepositoryResult<Option<Board>>;

    /// Returns all boards owned by the given user, oldest first.
    async fn boards_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<Board>>;
}

/// List persistence contract.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Stores a new list and appends it to the parent board's membership
    /// sequence in one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::BoardNotFound`] when the parent board does
    /// not exist, or [`RepositoryError::DuplicateList`] when the identifier
    /// already exists.
    async fn store(&self, list: &List) -> RepositoryResult<()>;

    /// Persists changes to an existing list (title, archive state,
    /// position, task membership).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ListNotFound`] when the list does not
    /// exist.
    async fn update(&self, list: &List) -> RepositoryResult<()>;

    /// Finds a list by identifier.
    ///
    /// Returns `None` when the list does not exist.
    async fn find_by_id(&self, id: ListId) -> RepositoryResult<Option<List>>;

    /// Returns the board's active lists sorted ascending by position.
    async fn active_for_board(&self, board: BoardId) -> RepositoryResult<Vec<List>>;

    /// Returns the board's archived lists, most recently updated first.
    async fn archived_for_board(&self, board: BoardId) -> RepositoryResult<Vec<List>>;

    /// Returns the highest position among all of the board's lists,
    /// archived included, or `None` when the board has no lists.
    async fn last_position(&self, board: BoardId) -> RepositoryResult<Option<Position>>;

    /// Applies a resolved position write-set to the board's lists and
    /// returns the canonical active sibling set sorted by position.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::BoardNotFound`] when the board does not
    /// exist, or [`RepositoryError::ListMembership`] when an assignment
    /// names a list that is not a member of the board; no assignment is
    /// applied.
    async fn reorder(
        &self,
        board: BoardId,
        assignments: &[(ListId, Position)],
    ) -> RepositoryResult<Vec<List>>;

    /// Permanently deletes a list: removes it from the board membership
    /// sequence, cascade-deletes its tasks, and drops the list, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ListNotFound`] when the list does not
    /// exist, or [`RepositoryError::ListMembership`] when it belongs to a
    /// different board.
    async fn delete(&self, board: BoardId, list: ListId) -> RepositoryResult<()>;

    /// Permanently deletes every archived list of the board (cascading as
    /// [`Self::delete`]) and returns how many lists were removed.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::BoardNotFound`] when the board does not
    /// exist.
    async fn delete_archived(&self, board: BoardId) -> RepositoryResult<u64>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and appends it to the parent list's membership
    /// sequence in one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ListNotFound`] when the parent list does
    /// not exist, [`RepositoryError::ListMembership`] when the task's
    /// denormalized board does not match the list's board, or
    /// [`RepositoryError::DuplicateTask`] when the identifier already
    /// exists.
    async fn store(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists changes to an existing task (title, completion, position).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> RepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Returns the list's tasks sorted ascending by position.
    async fn tasks_for_list(&self, list: ListId) -> RepositoryResult<Vec<Task>>;

    /// Returns the highest position among the list's tasks, or `None` when
    /// the list has no tasks.
    async fn last_position(&self, list: ListId) -> RepositoryResult<Option<Position>>;

    /// Applies a resolved position write-set to the list's tasks and
    /// returns the canonical sibling set sorted by position.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ListNotFound`] when the list does not
    /// exist, or [`RepositoryError::TaskMembership`] when an assignment
    /// names a task that is not a member of the list; no assignment is
    /// applied.
    async fn reorder(
        &self,
        list: ListId,
        assignments: &[(TaskId, Position)],
    ) -> RepositoryResult<Vec<Task>>;

    /// Moves a task between lists in one atomic step: detaches it from the
    /// source membership sequence, appends it to the target's, and
    /// reparents the task at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] or
    /// [`RepositoryError::ListNotFound`] when a participant does not exist,
    /// or [`RepositoryError::TaskMembership`] when the task is not a member
    /// of the source list.
    async fn move_task(
        &self,
        task: TaskId,
        from: ListId,
        to: ListId,
        position: Position,
    ) -> RepositoryResult<Task>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A board with the same identifier already exists.
    #[error("duplicate board identifier: {0}")]
    DuplicateBoard(BoardId),

    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The list was not found.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The list does not belong to the stated board.
    #[error("list {list} is not a member of board {board}")]
    ListMembership {
        /// List whose membership failed the check.
        list: ListId,
        /// Board stated as the parent.
        board: BoardId,
    },

    /// The task does not belong to the stated list.
    #[error("task {task} is not a member of list {list}")]
    TaskMembership {
        /// Task whose membership failed the check.
        task: TaskId,
        /// List stated as the parent.
        list: ListId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
