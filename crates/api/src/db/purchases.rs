//! `PostgreSQL`-backed purchase store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use carbon_tracker_core::{PurchaseId, PurchaseRecord, UserId};

use super::{PurchaseStore, RepositoryError};

/// Purchase store over a `PostgreSQL` pool.
///
/// The pool is created once at process start and shared across all
/// invocations (see `AppState`).
#[derive(Clone)]
pub struct PgPurchaseStore {
    pool: PgPool,
}

/// Row shape of the `purchase` table.
#[derive(sqlx::FromRow)]
struct PurchaseRow {
    purchase_id: Uuid,
    user_id: String,
    product_name: String,
    purchase_date: DateTime<Utc>,
    weight: Decimal,
    shipping_distance: Decimal,
    delivery_mode: String,
    carbon_emission_value: Decimal,
}

impl PurchaseRow {
    fn into_record(self) -> Result<PurchaseRecord, RepositoryError> {
        let user_id = UserId::parse(&self.user_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user id in store: {e}"))
        })?;

        Ok(PurchaseRecord {
            purchase_id: PurchaseId::from(self.purchase_id),
            user_id,
            product_name: self.product_name,
            purchase_date: self.purchase_date,
            weight: self.weight,
            shipping_distance: self.shipping_distance,
            delivery_mode: self.delivery_mode,
            carbon_emission_value: self.carbon_emission_value,
        })
    }
}

impl PgPurchaseStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PurchaseStore for PgPurchaseStore {
    async fn put(&self, record: PurchaseRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO purchase
                (purchase_id, user_id, product_name, purchase_date,
                 weight, shipping_distance, delivery_mode, carbon_emission_value)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(record.purchase_id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(&record.product_name)
        .bind(record.purchase_date)
        .bind(record.weight)
        .bind(record.shipping_distance)
        .bind(&record.delivery_mode)
        .bind(record.carbon_emission_value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn by_user(&self, user_id: &UserId) -> Result<Vec<PurchaseRecord>, RepositoryError> {
        // No ORDER BY: the contract is index order, whatever that is
        let rows = sqlx::query_as::<_, PurchaseRow>(
            r"
            SELECT purchase_id, user_id, product_name, purchase_date,
                   weight, shipping_distance, delivery_mode, carbon_emission_value
            FROM purchase
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PurchaseRow::into_record).collect()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
