//! Task aggregate root.

use super::{BoardId, ListId, Position, TaskId, Title, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate: one card within a list.
///
/// The parent board reference is denormalized alongside the parent list so
/// authorization checks do not need a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    list_id: ListId,
    board_id: BoardId,
    owner: UserId,
    title: Title,
    position: Position,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted parent list.
    pub list_id: ListId,
    /// Persisted parent board.
    pub board_id: BoardId,
    /// Persisted owning user.
    pub owner: UserId,
    /// Persisted title.
    pub title: Title,
    /// Persisted sibling sort key.
    pub position: Position,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new incomplete task at the given sibling position.
    #[must_use]
    pub fn new(
        list_id: ListId,
        board_id: BoardId,
        owner: UserId,
        title: Title,
        position: Position,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            list_id,
            board_id,
            owner,
            title,
            position,
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            list_id: data.list_id,
            board_id: data.board_id,
            owner: data.owner,
            title: data.title,
            position: data.position,
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent list.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the parent board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the sibling sort key.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: Title, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Sets the completion flag.
    pub fn set_completed(&mut self, completed: bool, clock: &impl Clock) {
        self.completed = completed;
        self.touch(clock);
    }

    /// Reparents the task to another list at the given position.
    ///
    /// Applied by the move resolver inside its atomic write-set together
    /// with the membership updates on both lists.
    pub const fn relocate(&mut self, list_id: ListId, position: Position) {
        self.list_id = list_id;
        self.position = position;
    }

    /// Overwrites the sibling sort key.
    ///
    /// Renumbering writes do not touch `updated_at`.
    pub const fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
