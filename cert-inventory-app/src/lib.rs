//! Platform-agnostic application bootstrap for the SSL certificate inventory.
//!
//! Provides `AppConfig` (the JSON config document), `JsonConfigStore` (the
//! inventory persisted inside that document), `AppState` (service container)
//! and `AppStateBuilder` (adapter injection).

pub mod adapters;
pub mod config;

use std::collections::BTreeMap;
use std::sync::Arc;

use cert_inventory_core::error::{CoreError, CoreResult};
use cert_inventory_core::services::{InventoryService, RefreshSummary, ServiceContext};
use cert_inventory_core::traits::{PlatformSourceFactory, SourceFactory};
use cert_inventory_core::types::{ApiCredential, LocalCertificate};

use adapters::JsonConfigStore;
use config::AppConfig;

/// Platform-agnostic application state.
///
/// Every frontend constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Inventory service (local scan and cloud refresh)
    pub inventory_service: Arc<InventoryService>,
    /// Config document and persisted inventory
    pub store: Arc<JsonConfigStore>,
    /// Credentials loaded from the key file at startup
    pub credentials: Arc<Vec<ApiCredential>>,
}

impl AppState {
    /// Current config document, inventory included.
    pub async fn config_snapshot(&self) -> AppConfig {
        self.store.config().await
    }

    /// Scan the configured local directories and merge the result.
    pub async fn refresh_local(&self) -> CoreResult<BTreeMap<String, LocalCertificate>> {
        let config = self.store.config().await;
        if config.ssl_cert_path_list.is_empty() {
            log::info!("No local certificate paths configured");
        }
        self.inventory_service
            .refresh_local(&config.ssl_cert_path_list, config.ssl_cert_path_max_depth)
            .await
    }

    /// Query every credential's cloud account and merge the result.
    pub async fn refresh_cloud(&self) -> CoreResult<RefreshSummary> {
        self.inventory_service.refresh_cloud(&self.credentials).await
    }
}

/// Builder for constructing `AppState`.
///
/// # Required
/// - `store` — where the config document and inventory live
///
/// # Optional
/// - `credentials` — defaults to none (cloud refresh becomes a no-op)
/// - `source_factory` — defaults to `PlatformSourceFactory`
pub struct AppStateBuilder {
    store: Option<Arc<JsonConfigStore>>,
    credentials: Vec<ApiCredential>,
    source_factory: Option<Arc<dyn SourceFactory>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            credentials: Vec::new(),
            source_factory: None,
        }
    }

    #[must_use]
    pub fn store(mut self, store: Arc<JsonConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Vec<ApiCredential>) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn source_factory(mut self, factory: Arc<dyn SourceFactory>) -> Self {
        self.source_factory = Some(factory);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if the store is missing.
    pub fn build(self) -> CoreResult<AppState> {
        let store = self
            .store
            .ok_or_else(|| CoreError::ValidationError("store is required".to_string()))?;
        let source_factory = self
            .source_factory
            .unwrap_or_else(|| Arc::new(PlatformSourceFactory));

        let ctx = Arc::new(ServiceContext::new(store.clone(), source_factory));
        let inventory_service = Arc::new(InventoryService::new(ctx));

        Ok(AppState {
            inventory_service,
            store,
            credentials: Arc::new(self.credentials),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
