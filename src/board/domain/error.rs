//! Error types for board domain validation.

use super::ListId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the persisted column width.
    #[error("title of {length} characters exceeds the maximum")]
    TitleTooLong {
        /// Character count of the rejected title.
        length: usize,
    },

    /// Permanent deletion was requested for a list that is still active.
    #[error("list {0} must be archived before permanent deletion")]
    ListNotArchived(ListId),
}
