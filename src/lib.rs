//! # practice-client
//!
//! Leptos + WASM frontend for the arithmetic practice service.
//!
//! The session store (`state::session`) owns the signed-in token and user and
//! mirrors them into `localStorage`; the route guard (`router::guard`) reads
//! that storage to keep signed-out visitors on `/login`. Pages wrap the
//! practice API through `net::api`.
//!
//! Browser-only code sits behind the `csr` feature so the crate's logic and
//! tests also build for the host target.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod storage;
pub mod util;

/// WASM entry point: install panic and log hooks, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        // The logger that is already installed still receives this.
        log::warn!("console logger not installed: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
