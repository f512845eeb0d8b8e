//! Client-side optimistic store for one board.
//!
//! A drag gesture is applied to the local [`BoardMirror`] immediately, then
//! sent to the server; the canonical response replaces the optimistic state
//! via an apply/reconcile cycle keyed by request sequence numbers, so
//! responses arriving out of order cannot roll the display state backwards.

mod mirror;
mod patch;
mod view;

pub use mirror::{BoardMirror, SequenceNumber};
pub use patch::BoardPatch;
pub use view::{BoardView, ListView, TaskView};
