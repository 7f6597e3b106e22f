//! Shopkeeper Core - Shared types library.
//!
//! This crate provides common types used across all Shopkeeper components:
//! - `admin` - The store administration API server
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and constants - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! consumed anywhere, including by UI layers that want the same field
//! constraints the server enforces.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe entity IDs
//! - [`fields`] - Statically declared field-constraint tables per entity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fields;
pub mod types;

pub use fields::{FieldKind, FieldSpec};
pub use types::*;
