//! Merchify Core - Shared types library.
//!
//! This crate provides the types shared by the Merchify dashboard components:
//! - `dashboard` - In-memory store, session store and JSON API
//! - `integration-tests` - End-to-end tests of the HTTP API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
