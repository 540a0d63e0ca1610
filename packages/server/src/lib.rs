//! Roomcast server: a room-scoped WebSocket chat relay.
//!
//! Layers:
//!
//! - [`domain`]: envelopes, client records and the registry / publisher ports
//! - [`infrastructure`]: in-memory registry, two-lane fan-out, wire codec
//! - [`usecase`]: join, relay, leave and listing
//! - [`ui`]: axum router, WebSocket and HTTP handlers

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
