//! Service-level error taxonomy for board operations.

use crate::board::domain::{BoardDomainError, BoardId, ListId, ReorderError, TaskId, UserId};
use crate::board::ports::RepositoryError;
use std::fmt;
use thiserror::Error;

/// Result type for board service operations.
pub type ServiceResult<T> = Result<T, BoardServiceError>;

/// Coarse classification of a service error, for callers that map errors
/// onto a transport (HTTP status codes, exit codes, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input failed domain validation.
    Validation,
    /// A referenced entity does not resolve.
    NotFound,
    /// The caller does not own the touched entity.
    Authorization,
    /// An entity does not belong to its stated parent.
    Integrity,
    /// The storage layer failed.
    Storage,
}

/// Errors returned by board, list, and task services.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The list was not found.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The caller does not own the board.
    #[error("user {user} is not authorized for board {board}")]
    UnauthorizedBoard {
        /// Requesting user.
        user: UserId,
        /// Board the user does not own.
        board: BoardId,
    },

    /// The caller does not own the task.
    #[error("user {user} is not authorized for task {task}")]
    UnauthorizedTask {
        /// Requesting user.
        user: UserId,
        /// Task the user does not own.
        task: TaskId,
    },

    /// The list does not belong to the stated board.
    #[error("list {list} does not belong to board {board}")]
    ListOutsideBoard {
        /// List whose parent check failed.
        list: ListId,
        /// Board stated as the parent.
        board: BoardId,
    },

    /// The task does not belong to the stated board.
    #[error("task {task} does not belong to board {board}")]
    TaskOutsideBoard {
        /// Task whose parent check failed.
        task: TaskId,
        /// Board stated as the parent.
        board: BoardId,
    },

    /// The task does not belong to the stated source list.
    #[error("task {task} does not belong to list {list}")]
    TaskOutsideList {
        /// Task whose parent check failed.
        task: TaskId,
        /// List stated as the source.
        list: ListId,
    },

    /// A move named the same list as source and target; single-container
    /// reordering is its own operation.
    #[error("source and target list are both {0}; use reorder instead")]
    SameListMove(ListId),

    /// A reorder request referenced an identifier outside the container.
    #[error("reorder request references {0}, which is not a member of the container")]
    ReorderForeignMember(String),

    /// A reorder request repeated an identifier.
    #[error("reorder request repeats identifier {0}")]
    ReorderDuplicateMember(String),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BoardServiceError {
    /// Converts a reorder-plan resolution error into the service taxonomy.
    #[must_use]
    pub fn from_reorder<I: fmt::Display + fmt::Debug>(err: ReorderError<I>) -> Self {
        match err {
            ReorderError::ForeignIdentifier(id) => Self::ReorderForeignMember(id.to_string()),
            ReorderError::DuplicateIdentifier(id) => Self::ReorderDuplicateMember(id.to_string()),
        }
    }

    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::BoardNotFound(_) | Self::ListNotFound(_) | Self::TaskNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::UnauthorizedBoard { .. } | Self::UnauthorizedTask { .. } => {
                ErrorKind::Authorization
            }
            Self::ListOutsideBoard { .. }
            | Self::TaskOutsideBoard { .. }
            | Self::TaskOutsideList { .. }
            | Self::SameListMove(_)
            | Self::ReorderForeignMember(_)
            | Self::ReorderDuplicateMember(_) => ErrorKind::Integrity,
            Self::Repository(err) => match err {
                RepositoryError::BoardNotFound(_)
                | RepositoryError::ListNotFound(_)
                | RepositoryError::TaskNotFound(_) => ErrorKind::NotFound,
                RepositoryError::ListMembership { .. } | RepositoryError::TaskMembership { .. } => {
                    ErrorKind::Integrity
                }
                RepositoryError::DuplicateBoard(_)
                | RepositoryError::DuplicateList(_)
                | RepositoryError::DuplicateTask(_)
                | RepositoryError::Persistence(_) => ErrorKind::Storage,
            },
        }
    }
}
