//! Core types for Carbon Tracker.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod record;

pub use id::{PurchaseId, UserId, UserIdError};
pub use record::{DEFAULT_DELIVERY_MODE, PurchaseRecord};
