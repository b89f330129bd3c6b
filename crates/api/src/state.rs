//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::CarbonConfig;
use crate::db::PurchaseStore;
use crate::services::Notifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// long-lived external-client handles. Both clients are constructed once
/// at process start and injected here; handlers never build their own.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CarbonConfig,
    store: Arc<dyn PurchaseStore>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// `notifier` is `None` when no notification channel is configured;
    /// the recorder then skips publishing entirely.
    #[must_use]
    pub fn new(
        config: CarbonConfig,
        store: Arc<dyn PurchaseStore>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                notifier,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &CarbonConfig {
        &self.inner.config
    }

    /// Get a reference to the record store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn PurchaseStore> {
        &self.inner.store
    }

    /// Get the notification channel, if one is configured.
    #[must_use]
    pub fn notifier(&self) -> Option<&Arc<dyn Notifier>> {
        self.inner.notifier.as_ref()
    }
}
