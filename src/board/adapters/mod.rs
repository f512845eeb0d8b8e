//! Adapter implementations of the board context's ports.

pub mod memory;
pub mod postgres;
