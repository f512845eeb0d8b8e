//! Pegboard: a multi-user kanban board engine.
//!
//! Users own boards, boards hold ordered lists, and lists hold ordered
//! tasks. Lists and tasks are drag-reordered with a sparse integer position
//! scheme, tasks move across lists, and lists archive, restore, and
//! permanently delete.
//!
//! # Architecture
//!
//! Pegboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`board`]: Boards, ordered lists, ordered tasks, and the position
//!   scheme behind drag-reorder and cross-list movement
//! - [`sync`]: Client-side optimistic mirror with sequence-numbered
//!   reconciliation

pub mod board;
pub mod sync;
