//! List aggregate and its archive state machine.

use super::{BoardDomainError, BoardId, ListId, Position, TaskId, Title};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Archive lifecycle state of a list.
///
/// Lists start `Active`, may be archived and restored any number of times,
/// and may only be permanently deleted out of `Archived`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListState {
    /// List is visible in normal board retrieval.
    #[default]
    Active,
    /// List is retained in storage but excluded from normal board retrieval.
    Archived,
}

impl ListState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    /// Returns whether this state is `Archived`.
    #[must_use]
    pub const fn is_archived(self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Maps the persisted archived flag to a state.
    #[must_use]
    pub const fn from_archived_flag(archived: bool) -> Self {
        if archived { Self::Archived } else { Self::Active }
    }
}

/// List aggregate: an ordered container of tasks within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    id: ListId,
    board_id: BoardId,
    title: Title,
    position: Position,
    tasks: Vec<TaskId>,
    state: ListState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted list aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedListData {
    /// Persisted list identifier.
    pub id: ListId,
    /// Persisted parent board.
    pub board_id: BoardId,
    /// Persisted title.
    pub title: Title,
    /// Persisted sibling sort key.
    pub position: Position,
    /// Persisted task membership sequence.
    pub tasks: Vec<TaskId>,
    /// Persisted archive state.
    pub state: ListState,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl List {
    /// Creates a new active list at the given sibling position.
    #[must_use]
    pub fn new(board_id: BoardId, title: Title, position: Position, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ListId::new(),
            board_id,
            title,
            position,
            tasks: Vec::new(),
            state: ListState::Active,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedListData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            title: data.title,
            position: data.position,
            tasks: data.tasks,
            state: data.state,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the parent board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
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

    /// Returns the task membership sequence in attachment order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    /// Returns the archive state.
    #[must_use]
    pub const fn state(&self) -> ListState {
        self.state
    }

    /// Returns whether the list is archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.state.is_archived()
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

    /// Archives the list, excluding it from normal board retrieval.
    ///
    /// The position is left unchanged. Archiving an archived list is
    /// idempotent.
    pub fn archive(&mut self, clock: &impl Clock) {
        self.state = ListState::Archived;
        self.touch(clock);
    }

    /// Restores an archived list to the active set.
    ///
    /// The server does not reassign a position on restore; the list keeps
    /// the sort key it had when archived.
    pub fn unarchive(&mut self, clock: &impl Clock) {
        self.state = ListState::Active;
        self.touch(clock);
    }

    /// Checks that permanent deletion is a permitted transition.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ListNotArchived`] when the list is still
    /// active; deletion is only reachable out of the archived state.
    pub const fn ensure_deletable(&self) -> Result<(), BoardDomainError> {
        if self.state.is_archived() {
            Ok(())
        } else {
            Err(BoardDomainError::ListNotArchived(self.id))
        }
    }

    /// Overwrites the sibling sort key.
    ///
    /// Renumbering writes do not touch `updated_at`; archived-list ordering
    /// keys on archive time.
    pub const fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Returns whether the given task belongs to this list's membership
    /// sequence.
    #[must_use]
    pub fn contains_task(&self, task: TaskId) -> bool {
        self.tasks.contains(&task)
    }

    /// Appends a task to the membership sequence.
    ///
    /// Attaching an already-attached task is a no-op; membership entries are
    /// unique.
    pub fn attach_task(&mut self, task: TaskId) {
        if !self.contains_task(task) {
            self.tasks.push(task);
        }
    }

    /// Removes a task from the membership sequence.
    ///
    /// Returns whether an entry was removed.
    pub fn detach_task(&mut self, task: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|member| *member != task);
        self.tasks.len() != before
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
