//! Adapter implementations for access-control ports.

pub mod memory;
