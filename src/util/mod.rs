//! Utility helpers shared across page modules.

pub mod auth;
pub mod clock;
pub mod format;
