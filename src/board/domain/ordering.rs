//! Sparse integer position scheme for ordered sibling collections.
//!
//! Positions are plain integers used purely for ascending sort order among
//! siblings; values need not be contiguous and uniqueness is not enforced.
//! Appending assigns `max(sibling position) + step` without renumbering, and
//! drag-reorder renumbers the full sibling set with evenly spaced slots.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Sort key ordering an item among its siblings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(i64);

impl Position {
    /// Position assigned to the first item of an empty collection.
    pub const ZERO: Self = Self(0);

    /// Creates a position from a raw sort key.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw sort key.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spacing rules for one kind of ordered collection.
///
/// Lists use unit steps (board list counts stay small); tasks use a 1000-wide
/// gap so future in-between insertion can avoid immediate renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionScheme {
    append_step: i64,
    slot_step: i64,
    first_slot: i64,
}

impl PositionScheme {
    /// Scheme for lists within a board: append step 1, reorder slots
    /// `0, 1, 2, …`.
    pub const LISTS: Self = Self {
        append_step: 1,
        slot_step: 1,
        first_slot: 0,
    };

    /// Scheme for tasks within a list: append step 1000, reorder slots
    /// `1000, 2000, 3000, …`.
    pub const TASKS: Self = Self {
        append_step: 1000,
        slot_step: 1000,
        first_slot: 1,
    };

    /// Computes the position for an item appended after the given last
    /// sibling, or [`Position::ZERO`] when the collection is empty.
    #[must_use]
    pub const fn append_position(self, last_sibling: Option<Position>) -> Position {
        match last_sibling {
            Some(last) => Position::new(last.value() + self.append_step),
            None => Position::ZERO,
        }
    }

    /// Returns the evenly spaced position for the zero-based slot index.
    const fn slot_position(self, slot: i64) -> Position {
        Position::new((self.first_slot + slot) * self.slot_step)
    }

    /// Resolves a drag-reorder request into a full renumbering plan.
    ///
    /// `current` is the sibling identifier sequence in present position
    /// order; `requested` is the target ordering from the client. Requested
    /// identifiers take the leading slots in request order. Siblings omitted
    /// from the request are appended after the requested prefix, preserving
    /// their prior relative order, and renumbered with the same slot
    /// progression, so the plan always covers the full sibling set.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::ForeignIdentifier`] when the request names an
    /// identifier that is not a sibling, or
    /// [`ReorderError::DuplicateIdentifier`] when it repeats one.
    pub fn renumber<I>(self, current: &[I], requested: &[I]) -> Result<ReorderPlan<I>, ReorderError<I>>
    where
        I: Copy + Eq + Hash + fmt::Display + fmt::Debug,
    {
        let members: HashSet<I> = current.iter().copied().collect();
        let mut taken: HashSet<I> = HashSet::with_capacity(requested.len());
        for id in requested {
            if !members.contains(id) {
                return Err(ReorderError::ForeignIdentifier(*id));
            }
            if !taken.insert(*id) {
                return Err(ReorderError::DuplicateIdentifier(*id));
            }
        }

        let remainder = current.iter().copied().filter(|id| !taken.contains(id));
        let mut assignments = Vec::with_capacity(current.len());
        let mut slot: i64 = 0;
        for id in requested.iter().copied().chain(remainder) {
            assignments.push((id, self.slot_position(slot)));
            slot += 1;
        }
        Ok(ReorderPlan { assignments })
    }
}

/// Full position write-set resolved from a reorder request.
///
/// Applying the plan atomically and reading the siblings back sorted by
/// position yields exactly the planned ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan<I> {
    assignments: Vec<(I, Position)>,
}

impl<I: Copy> ReorderPlan<I> {
    /// Returns the planned `(identifier, position)` pairs in slot order.
    #[must_use]
    pub fn assignments(&self) -> &[(I, Position)] {
        &self.assignments
    }

    /// Returns the planned identifier ordering without positions.
    #[must_use]
    pub fn ordered_ids(&self) -> Vec<I> {
        self.assignments.iter().map(|(id, _)| *id).collect()
    }
}

/// Errors returned while resolving a reorder request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReorderError<I: fmt::Display + fmt::Debug> {
    /// The request names an identifier that is not a member of the
    /// reordered container.
    #[error("identifier {0} is not a member of the reordered container")]
    ForeignIdentifier(I),

    /// The request names the same identifier more than once.
    #[error("identifier {0} appears more than once in the reorder request")]
    DuplicateIdentifier(I),
}
