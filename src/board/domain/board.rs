//! Board aggregate root.

use super::{BoardId, ListId, Title, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Board aggregate root: the top-level container owning an ordered
/// membership sequence of lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    id: BoardId,
    owner: UserId,
    name: Title,
    lists: Vec<ListId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted owning user.
    pub owner: UserId,
    /// Persisted display name.
    pub name: Title,
    /// Persisted list membership sequence.
    pub lists: Vec<ListId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new empty board for the given owner.
    #[must_use]
    pub fn new(owner: UserId, name: Title, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: BoardId::new(),
            owner,
            name,
            lists: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            name: data.name,
            lists: data.lists,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &Title {
        &self.name
    }

    /// Returns the list membership sequence in attachment order.
    #[must_use]
    pub fn lists(&self) -> &[ListId] {
        &self.lists
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

    /// Returns whether the given list belongs to this board's membership
    /// sequence.
    #[must_use]
    pub fn contains_list(&self, list: ListId) -> bool {
        self.lists.contains(&list)
    }

    /// Appends a list to the membership sequence.
    ///
    /// Attaching an already-attached list is a no-op; membership entries are
    /// unique.
    pub fn attach_list(&mut self, list: ListId) {
        if !self.contains_list(list) {
            self.lists.push(list);
        }
    }

    /// Removes a list from the membership sequence.
    ///
    /// Returns whether an entry was removed.
    pub fn detach_list(&mut self, list: ListId) -> bool {
        let before = self.lists.len();
        self.lists.retain(|member| *member != list);
        self.lists.len() != before
    }
}
