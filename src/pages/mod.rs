//! Route-level page components.

pub mod history;
pub mod home;
pub mod login;
pub mod mistakes;
pub mod practice;
pub mod practice_detail;
pub mod profile;
pub mod register;
