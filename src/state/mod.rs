//! Client-side state.
//!
//! DESIGN
//! ======
//! `session` owns authentication and persistence; `auth` is the reactive
//! projection components render from.

pub mod auth;
pub mod session;

use crate::net::http::HttpClient;
use crate::storage::LocalStorage;

/// The session store wired to the browser transport and `localStorage`.
pub type AppSession = session::SessionStore<HttpClient, LocalStorage>;
