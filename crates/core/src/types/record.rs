//! The purchase record entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::emission::carbon_emission;
use crate::types::id::{PurchaseId, UserId};

/// Delivery mode applied when the caller does not supply one.
pub const DEFAULT_DELIVERY_MODE: &str = "Standard";

/// A logged purchase with its derived carbon emission estimate.
///
/// Records are immutable once created: there is no update or delete
/// operation anywhere in the system. `CarbonEmissionValue` is always
/// recomputed from `Weight` and `ShippingDistance` at creation and is
/// never supplied by a caller.
///
/// The PascalCase field names are the durable storage and wire contract;
/// decimals render as strings and the purchase date as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseRecord {
    /// Primary key, assigned at creation.
    pub purchase_id: PurchaseId,
    /// Secondary-index partition key.
    pub user_id: UserId,
    /// Human-readable product name.
    pub product_name: String,
    /// Server-assigned UTC creation timestamp.
    pub purchase_date: DateTime<Utc>,
    /// Shipment weight in kilograms.
    pub weight: Decimal,
    /// Shipping distance in kilometers.
    pub shipping_distance: Decimal,
    /// Free-form delivery mode label.
    pub delivery_mode: String,
    /// Derived: `Weight × ShippingDistance × 0.1`.
    pub carbon_emission_value: Decimal,
}

impl PurchaseRecord {
    /// Create a new record with a fresh [`PurchaseId`], the current UTC
    /// time, and the emission value derived from weight and distance.
    #[must_use]
    pub fn create(
        user_id: UserId,
        product_name: String,
        weight: Decimal,
        shipping_distance: Decimal,
        delivery_mode: String,
    ) -> Self {
        Self {
            purchase_id: PurchaseId::generate(),
            user_id,
            product_name,
            purchase_date: Utc::now(),
            carbon_emission_value: carbon_emission(weight, shipping_distance),
            weight,
            shipping_distance,
            delivery_mode,
        }
    }
}
