//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! POST /purchase          - Record a purchase
//! GET  /purchase?UserId=… - Purchase history for a user
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (pings the store)
//! ```
//!
//! Both purchase endpoints carry permissive CORS response headers so
//! browser-based clients can call them directly; the CORS layer also
//! answers OPTIONS preflights.

pub mod purchases;

use axum::http::{Method, header};
use axum::{Router, routing::post};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Create the purchase routes router.
pub fn routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/purchase",
            post(purchases::log_purchase).get(purchases::get_purchases),
        )
        .layer(cors)
}
