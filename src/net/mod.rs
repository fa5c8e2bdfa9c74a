//! Networking modules for the practice API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the transport, `gateway` is the auth seam the session store
//! depends on, `api` wraps the CRUD endpoints, and `types` defines the wire
//! schema.

pub mod api;
pub mod gateway;
pub mod http;
pub mod types;
