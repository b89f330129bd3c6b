//! Purchase notification publishing.
//!
//! The notification channel is an external collaborator reached over a
//! configured webhook endpoint. Publishing is best-effort and
//! fire-and-forget: the recorder spawns the publish after the record is
//! durably written and never waits for it, and a failed publish is logged
//! without affecting the request (the record's durability is the primary
//! contract).

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use carbon_tracker_core::PurchaseId;

use crate::config::NotificationConfig;

/// Subject line attached to every purchase notification.
const NOTIFICATION_SUBJECT: &str = "New Purchase Logged";

/// Confirmation text carried in the notification body.
const NOTIFICATION_MESSAGE: &str = "Your purchase has been logged successfully.";

/// Errors that can occur when publishing a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Client configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// Event describing a newly logged purchase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseNotification {
    pub user_id: String,
    pub purchase_id: PurchaseId,
    pub product_name: String,
    /// Approximate rendering for consumers; the exact decimal stays in
    /// the record.
    pub carbon_emission_value: f64,
    pub message: String,
    pub subject: String,
}

impl PurchaseNotification {
    /// Build the notification for a logged purchase.
    #[must_use]
    pub fn new(
        user_id: String,
        purchase_id: PurchaseId,
        product_name: String,
        carbon_emission_value: f64,
    ) -> Self {
        Self {
            user_id,
            purchase_id,
            product_name,
            carbon_emission_value,
            message: NOTIFICATION_MESSAGE.to_string(),
            subject: NOTIFICATION_SUBJECT.to_string(),
        }
    }
}

/// The notification channel seam.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish one notification.
    async fn publish(&self, notification: &PurchaseNotification) -> Result<(), NotifyError>;
}

/// Webhook-backed notifier.
///
/// The reqwest client is built once with its default headers and reused
/// across invocations.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookNotifier {
    /// Create a new webhook notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the auth
    /// token is not a valid header value.
    pub fn new(config: &NotificationConfig) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.auth_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| NotifyError::Config(format!("invalid auth token: {e}")))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.webhook_url.clone(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(&self, notification: &PurchaseNotification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(notification)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_notification_wire_shape() {
        let id = PurchaseId::from(Uuid::nil());
        let notification =
            PurchaseNotification::new("u1".to_string(), id, "Widget".to_string(), 20.0);

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["UserId"], "u1");
        assert_eq!(json["ProductName"], "Widget");
        // The emission is an approximate JSON number on this boundary
        assert_eq!(json["CarbonEmissionValue"], 20.0);
        assert_eq!(json["Message"], "Your purchase has been logged successfully.");
        assert_eq!(json["Subject"], "New Purchase Logged");
    }
}
