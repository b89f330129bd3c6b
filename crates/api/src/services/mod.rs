//! External service clients.

pub mod notifier;

pub use notifier::{Notifier, NotifyError, PurchaseNotification, WebhookNotifier};
