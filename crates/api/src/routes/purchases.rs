//! Purchase recorder and query handlers.
//!
//! Each invocation is an independent, stateless unit of work against the
//! shared record store. The only work outliving a request is the
//! fire-and-forget notification publish.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use carbon_tracker_core::{PurchaseRecord, UserId};

use crate::error::{AppError, Result};
use crate::payload::{self, USER_ID_MISSING};
use crate::services::PurchaseNotification;
use crate::state::AppState;

/// Confirmation returned by the recorder.
#[derive(Debug, Serialize)]
pub struct LogPurchaseResponse {
    pub message: String,
    #[serde(rename = "PurchaseId")]
    pub purchase_id: String,
    /// Approximate rendering of the exact stored decimal.
    #[serde(rename = "CarbonEmissionValue")]
    pub carbon_emission_value: f64,
}

/// Record a purchase.
///
/// POST /purchase
///
/// Accepts the submission either as a direct JSON payload or wrapped in a
/// request envelope (see [`crate::payload`]). Persists exactly one record
/// and, when a notification channel is configured, publishes the purchase
/// event without awaiting it.
///
/// # Errors
///
/// `AppError::Validation` for malformed or incomplete submissions,
/// `AppError::Storage` when the store rejects the write.
#[instrument(skip(state, body))]
pub async fn log_purchase(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<LogPurchaseResponse>)> {
    let submission = payload::parse_submission(&body)?;

    let record = PurchaseRecord::create(
        submission.user_id,
        submission.product_name,
        submission.weight,
        submission.shipping_distance,
        submission.delivery_mode,
    );

    state.store().put(record.clone()).await?;

    let emission = record.carbon_emission_value.to_f64().ok_or_else(|| {
        AppError::Internal(format!(
            "emission value {} not representable as a float",
            record.carbon_emission_value
        ))
    })?;

    // Best-effort: the record is durable at this point, so a failed
    // publish is logged and the request still succeeds
    if let Some(notifier) = state.notifier() {
        let notifier = Arc::clone(notifier);
        let notification = PurchaseNotification::new(
            record.user_id.as_str().to_owned(),
            record.purchase_id,
            record.product_name.clone(),
            emission,
        );
        tokio::spawn(async move {
            if let Err(e) = notifier.publish(&notification).await {
                tracing::warn!(
                    error = %e,
                    purchase_id = %notification.purchase_id,
                    "purchase notification publish failed"
                );
            }
        });
    }

    tracing::info!(
        purchase_id = %record.purchase_id,
        user_id = %record.user_id,
        emission,
        "purchase logged"
    );

    Ok((
        StatusCode::CREATED,
        Json(LogPurchaseResponse {
            message: "Purchase logged successfully".to_string(),
            purchase_id: record.purchase_id.to_string(),
            carbon_emission_value: emission,
        }),
    ))
}

/// Query parameters for the purchase history endpoint.
#[derive(Debug, Deserialize)]
pub struct PurchaseQueryParams {
    #[serde(rename = "UserId")]
    pub user_id: Option<String>,
}

/// Purchase history for a user.
///
/// GET /purchase?UserId=…
///
/// Returns every record the secondary index holds for the user, in index
/// order. An unknown user yields an empty array, not an error.
///
/// # Errors
///
/// `AppError::Validation` when `UserId` is missing or empty,
/// `AppError::Storage` when the index query fails.
#[instrument(skip(state))]
pub async fn get_purchases(
    State(state): State<AppState>,
    Query(params): Query<PurchaseQueryParams>,
) -> Result<Json<Vec<PurchaseRecord>>> {
    let user_id = params
        .user_id
        .as_deref()
        .and_then(|s| UserId::parse(s).ok())
        .ok_or_else(|| AppError::Validation(USER_ID_MISSING.to_string()))?;

    let records = state.store().by_user(&user_id).await?;

    tracing::info!(user_id = %user_id, count = records.len(), "purchase history served");

    Ok(Json(records))
}
