//! End-to-end recorder and query flows against the in-process router.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use carbon_tracker_integration_tests::{TestApp, get, json_body, post_purchase};

const WIDGET: &str = r#"{"UserId":"u1","ProductName":"Widget","Weight":2,"ShippingDistance":100}"#;

/// Wait for the fire-and-forget notification task to run.
async fn wait_for_notifications(app: &TestApp, count: usize) {
    for _ in 0..50 {
        if app.notifier.published().await.len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("notification was never published");
}

#[tokio::test]
async fn test_record_purchase_returns_confirmation() {
    let app = TestApp::new();

    let response = post_purchase(&app.router, WIDGET).await;
    let body = json_body(response, StatusCode::CREATED).await;

    assert_eq!(body["message"], "Purchase logged successfully");
    assert!(!body["PurchaseId"].as_str().unwrap().is_empty());
    // Emission is a JSON number on this boundary: 2 * 100 * 0.1
    assert_eq!(body["CarbonEmissionValue"], 20.0);
}

#[tokio::test]
async fn test_record_then_query_round_trip() {
    let app = TestApp::new();

    let response = post_purchase(&app.router, WIDGET).await;
    let created = json_body(response, StatusCode::CREATED).await;

    let response = get(&app.router, "/purchase?UserId=u1").await;
    let body = json_body(response, StatusCode::OK).await;

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record["PurchaseId"], created["PurchaseId"]);
    assert_eq!(record["UserId"], "u1");
    assert_eq!(record["ProductName"], "Widget");
    assert_eq!(record["DeliveryMode"], "Standard");
    // Stored decimals render as strings
    assert_eq!(record["Weight"], "2");
    assert_eq!(record["ShippingDistance"], "100");
    assert_eq!(record["CarbonEmissionValue"], "20.0");
    assert!(record["PurchaseDate"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_query_unknown_user_returns_empty_array() {
    let app = TestApp::new();

    let response = get(&app.router, "/purchase?UserId=nobody").await;
    let body = json_body(response, StatusCode::OK).await;

    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_enveloped_submission_is_unwrapped() {
    let app = TestApp::new();

    let envelope = serde_json::json!({ "body": WIDGET }).to_string();
    let response = post_purchase(&app.router, &envelope).await;
    let body = json_body(response, StatusCode::CREATED).await;

    assert_eq!(body["CarbonEmissionValue"], 20.0);
}

#[tokio::test]
async fn test_multiple_purchases_all_returned() {
    let app = TestApp::new();

    for _ in 0..3 {
        post_purchase(&app.router, WIDGET).await;
    }

    let response = get(&app.router, "/purchase?UserId=u1").await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_delivery_mode_is_preserved() {
    let app = TestApp::new();

    let submission = r#"{"UserId":"u2","ProductName":"Crate","Weight":1,"ShippingDistance":5,"DeliveryMode":"Ground"}"#;
    post_purchase(&app.router, submission).await;

    let response = get(&app.router, "/purchase?UserId=u2").await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body[0]["DeliveryMode"], "Ground");
}

#[tokio::test]
async fn test_notification_published_after_record() {
    let app = TestApp::new();

    post_purchase(&app.router, WIDGET).await;
    wait_for_notifications(&app, 1).await;

    let published = app.notifier.published().await;
    assert_eq!(published.len(), 1);
    let notification = published.first().unwrap();
    assert_eq!(notification.user_id, "u1");
    assert_eq!(notification.product_name, "Widget");
    assert!((notification.carbon_emission_value - 20.0).abs() < f64::EPSILON);
    assert_eq!(
        notification.message,
        "Your purchase has been logged successfully."
    );
}

#[tokio::test]
async fn test_cors_headers_attached() {
    let app = TestApp::new();

    let response = get(&app.router, "/purchase?UserId=u1").await;
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
