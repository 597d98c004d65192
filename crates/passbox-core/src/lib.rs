//! Core library for passbox.
//!
//! Contains the request schema validator, the salted credential hasher,
//! the account manager, and the record store gateway. This crate depends
//! on `passbox-storage` for the document store trait and knows nothing
//! about HTTP.

pub mod account;
pub mod crypto;
pub mod error;
pub mod record;
pub mod schema;
