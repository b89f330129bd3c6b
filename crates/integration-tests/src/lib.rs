//! Shared helpers for Carbon Tracker integration tests.
//!
//! Tests drive the real router in-process through `tower::ServiceExt`,
//! with the in-memory store standing in for `PostgreSQL` and a capturing
//! notifier standing in for the webhook channel.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use carbon_tracker_api::config::CarbonConfig;
use carbon_tracker_api::db::{MemoryPurchaseStore, PurchaseStore, RepositoryError};
use carbon_tracker_api::routes;
use carbon_tracker_api::services::{Notifier, NotifyError, PurchaseNotification};
use carbon_tracker_api::state::AppState;
use carbon_tracker_core::{PurchaseRecord, UserId};

/// A notifier that records every published notification.
#[derive(Default)]
pub struct CaptureNotifier {
    published: Mutex<Vec<PurchaseNotification>>,
}

impl CaptureNotifier {
    /// Snapshot of everything published so far.
    pub async fn published(&self) -> Vec<PurchaseNotification> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for CaptureNotifier {
    async fn publish(&self, notification: &PurchaseNotification) -> Result<(), NotifyError> {
        self.published.lock().await.push(notification.clone());
        Ok(())
    }
}

/// A store whose every operation fails, for exercising the 500 path.
pub struct FailingStore;

#[async_trait]
impl PurchaseStore for FailingStore {
    async fn put(&self, _record: PurchaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    async fn by_user(&self, _user_id: &UserId) -> Result<Vec<PurchaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// The service wired up for in-process testing.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryPurchaseStore>,
    pub notifier: Arc<CaptureNotifier>,
}

fn test_config() -> CarbonConfig {
    CarbonConfig {
        database_url: SecretString::from("postgres://localhost/unused"),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        notification: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

impl TestApp {
    /// Build the router over an empty in-memory store and a capturing
    /// notification channel.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryPurchaseStore::new());
        let notifier = Arc::new(CaptureNotifier::default());
        let state = AppState::new(
            test_config(),
            store.clone() as Arc<dyn PurchaseStore>,
            Some(notifier.clone() as Arc<dyn Notifier>),
        );
        let router = routes::routes().with_state(state);

        Self {
            router,
            store,
            notifier,
        }
    }

    /// Build the router over a store that fails every operation.
    #[must_use]
    pub fn with_failing_store() -> Router {
        let state = AppState::new(test_config(), Arc::new(FailingStore), None);
        routes::routes().with_state(state)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// POST a raw body to /purchase and return the response.
///
/// # Panics
///
/// Panics if the request cannot be dispatched.
pub async fn post_purchase(router: &Router, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/purchase")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request");

    router.clone().oneshot(request).await.expect("response")
}

/// GET a uri and return the response.
///
/// # Panics
///
/// Panics if the request cannot be dispatched.
pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request");

    router.clone().oneshot(request).await.expect("response")
}

/// Read a response body as JSON, asserting the expected status first.
///
/// # Panics
///
/// Panics if the status differs or the body is not valid JSON.
pub async fn json_body(response: Response<Body>, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
