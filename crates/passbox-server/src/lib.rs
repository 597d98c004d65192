//! passbox HTTP server.
//!
//! Wires the core library and document store into a running Axum server.
//! Serves the JSON API: account registration at `/account/new` and
//! authenticated record get/set at `/{hardware_id}/{url}`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
