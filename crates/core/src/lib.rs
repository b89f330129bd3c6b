//! Carbon Tracker Core - Shared types library.
//!
//! This crate provides common types used across all Carbon Tracker
//! components:
//! - `api` - HTTP service recording purchases and serving purchase history
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and the `PurchaseRecord` entity
//! - [`emission`] - Exact-decimal carbon emission arithmetic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod emission;
pub mod types;

pub use emission::{EMISSION_FACTOR, carbon_emission};
pub use types::*;
