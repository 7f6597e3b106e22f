//! Shopkeeper Admin library.
//!
//! This crate provides the store administration API as a library, allowing
//! it to be tested end-to-end and reused by the CLI.
//!
//! # Security
//!
//! The service trusts the fronting authentication proxy to verify caller
//! identity and install it as the `x-user-id` request header. Deploy only
//! behind that proxy; the service itself performs per-store authorization
//! (the ownership gate), not authentication.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod validate;

pub use routes::app;
pub use state::AppState;
