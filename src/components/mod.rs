//! Reusable view components.

pub mod header;
