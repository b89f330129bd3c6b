//! In-memory purchase store.
//!
//! Backs the integration tests and local runs without `PostgreSQL`.
//! Implements the same per-record atomicity the managed store provides:
//! each `put` is a single write under the lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use carbon_tracker_core::{PurchaseRecord, UserId};

use super::{PurchaseStore, RepositoryError};

/// A thread-safe in-memory store, keyed by user id (the secondary index
/// is the only read path the service has, so that is the map key).
#[derive(Default, Clone)]
pub struct MemoryPurchaseStore {
    by_user: Arc<RwLock<HashMap<String, Vec<PurchaseRecord>>>>,
}

impl MemoryPurchaseStore {
    /// Create a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records, across all users.
    pub async fn len(&self) -> usize {
        self.by_user.read().await.values().map(Vec::len).sum()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PurchaseStore for MemoryPurchaseStore {
    async fn put(&self, record: PurchaseRecord) -> Result<(), RepositoryError> {
        let mut by_user = self.by_user.write().await;
        by_user
            .entry(record.user_id.as_str().to_owned())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn by_user(&self, user_id: &UserId) -> Result<Vec<PurchaseRecord>, RepositoryError> {
        let by_user = self.by_user.read().await;
        Ok(by_user.get(user_id.as_str()).cloned().unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn record(user: &str) -> PurchaseRecord {
        PurchaseRecord::create(
            UserId::parse(user).unwrap(),
            "Widget".to_owned(),
            Decimal::from(2),
            Decimal::from(100),
            "Standard".to_owned(),
        )
    }

    #[tokio::test]
    async fn test_put_then_query_by_user() {
        let store = MemoryPurchaseStore::new();
        let stored = record("u1");
        store.put(stored.clone()).await.unwrap();
        store.put(record("u2")).await.unwrap();

        let found = store.by_user(&UserId::parse("u1").unwrap()).await.unwrap();
        assert_eq!(found, vec![stored]);
    }

    #[tokio::test]
    async fn test_query_unknown_user_is_empty_not_error() {
        let store = MemoryPurchaseStore::new();
        let found = store
            .by_user(&UserId::parse("nobody").unwrap())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_len_counts_all_users() {
        let store = MemoryPurchaseStore::new();
        store.put(record("u1")).await.unwrap();
        store.put(record("u1")).await.unwrap();
        store.put(record("u2")).await.unwrap();
        assert_eq!(store.len().await, 3);
    }
}
