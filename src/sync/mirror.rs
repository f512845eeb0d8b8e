//! Optimistic board mirror with sequence-numbered reconciliation.

use super::patch::{BoardPatch, apply_patch};
use super::view::BoardView;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Monotonically increasing request number issued by a mirror.
///
/// Canonical responses carry the number of the request they answer, letting
/// the mirror discard responses that arrive out of order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    /// Returns the raw request number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct PendingPatch {
    seq: SequenceNumber,
    patch: BoardPatch,
}

/// Client-side replica of one board's view.
///
/// Drag gestures are applied optimistically and queued as pending patches;
/// each server request carries the sequence number handed out by
/// [`Self::apply`]. When the canonical response for request `n` arrives,
/// [`Self::reconcile`] installs it, drops patches up to `n`, and replays the
/// still-pending tail so later gestures stay visible.
#[derive(Debug, Clone)]
pub struct BoardMirror {
    canonical: BoardView,
    pending: VecDeque<PendingPatch>,
    next_request: u64,
    last_reconciled: Option<SequenceNumber>,
}

impl BoardMirror {
    /// Creates a mirror seeded with a server-canonical view.
    #[must_use]
    pub const fn new(canonical: BoardView) -> Self {
        Self {
            canonical,
            pending: VecDeque::new(),
            next_request: 1,
            last_reconciled: None,
        }
    }

    /// Returns the current display state: the canonical base with every
    /// pending patch replayed on top.
    #[must_use]
    pub fn view(&self) -> BoardView {
        let mut current = self.canonical.clone();
        for entry in &self.pending {
            apply_patch(&mut current, &entry.patch);
        }
        current
    }

    /// Returns the last server-confirmed view without pending patches.
    #[must_use]
    pub const fn canonical(&self) -> &BoardView {
        &self.canonical
    }

    /// Returns whether any patch still awaits server confirmation.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns the sequence number of the newest reconciled response.
    #[must_use]
    pub const fn last_reconciled(&self) -> Option<SequenceNumber> {
        self.last_reconciled
    }

    /// Applies a patch optimistically and returns the sequence number to
    /// attach to the matching server request.
    pub fn apply(&mut self, patch: BoardPatch) -> SequenceNumber {
        let seq = SequenceNumber(self.next_request);
        self.next_request += 1;
        self.pending.push_back(PendingPatch { seq, patch });
        seq
    }

    /// Installs the canonical response for request `seq`.
    ///
    /// Patches numbered at or below `seq` are confirmed (or superseded) by
    /// the response and dropped; later patches stay pending and replay on
    /// top of the new base. Returns `false` without touching any state when
    /// the response is stale, i.e. a response with a higher sequence number
    /// was already reconciled.
    pub fn reconcile(&mut self, seq: SequenceNumber, canonical: BoardView) -> bool {
        if self.last_reconciled.is_some_and(|last| last >= seq) {
            return false;
        }
        self.canonical = canonical;
        self.pending.retain(|entry| entry.seq > seq);
        self.last_reconciled = Some(seq);
        true
    }

    /// Drops the pending patch for a failed request, reverting its
    /// optimistic effect from [`Self::view`].
    ///
    /// Returns whether a pending patch with that number existed.
    pub fn abandon(&mut self, seq: SequenceNumber) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.seq != seq);
        self.pending.len() != before
    }
}
