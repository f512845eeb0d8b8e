//! Kanban board context: boards, ordered lists, and ordered tasks.
//!
//! The core of the context is the sparse integer position scheme that keeps
//! sibling ordering consistent under drag-reorder and cross-list movement:
//! appends take `max(sibling position) + step` without renumbering, and
//! reorders renumber the full sibling set with evenly spaced slots applied
//! atomically per container. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
