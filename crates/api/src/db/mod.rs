//! Record store access for purchase data.
//!
//! # Tables
//!
//! - `purchase` - One row per logged purchase, immutable after insert.
//!   The btree index on `user_id` is the secondary index the query
//!   endpoint reads through.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p carbon-tracker-cli -- migrate
//! ```
//! They are never run automatically on startup.

pub mod memory;
pub mod purchases;

use std::time::Duration;

use async_trait::async_trait;
use carbon_tracker_core::{PurchaseRecord, UserId};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryPurchaseStore;
pub use purchases::PgPurchaseStore;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store is not reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The record store seam.
///
/// Each implementation provides per-record atomic writes and a secondary
/// index keyed by user id. `by_user` returns records in whatever order the
/// index yields them; no ordering is imposed here. The persisted record
/// layout is a stable contract across backends.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Persist one record as a single atomic write.
    async fn put(&self, record: PurchaseRecord) -> Result<(), RepositoryError>;

    /// Fetch all records for a user through the secondary index.
    async fn by_user(&self, user_id: &UserId) -> Result<Vec<PurchaseRecord>, RepositoryError>;

    /// Cheap connectivity check for the readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
