//! JSON-file-backed inventory store.
//!
//! The inventory lives in the `platformSslCertInfos` array of the application
//! config document, so saving the inventory rewrites the whole document.

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cert_inventory_core::error::CoreResult;
use cert_inventory_core::traits::InventoryStore;
use cert_inventory_core::types::CertificateRecord;

use crate::config::AppConfig;

/// `InventoryStore` over the config document.
///
/// The in-memory copy is the source of truth while the process runs. Every
/// save rewrites the file under the write guard and only then updates the
/// in-memory copy, so file writes land in the order the saves were made and a
/// failed write leaves both unchanged. A config that failed to load is
/// read-only and every save fails with `StorageError`.
pub struct JsonConfigStore {
    config: RwLock<AppConfig>,
}

impl JsonConfigStore {
    /// Wrap an already loaded config.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Load the config document at `path` (see [`AppConfig::load`]).
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(AppConfig::load(path))
    }

    /// Snapshot of the current config, inventory included.
    pub async fn config(&self) -> AppConfig {
        self.config.read().await.clone()
    }
}

#[async_trait]
impl InventoryStore for JsonConfigStore {
    async fn load_records(&self) -> CoreResult<Vec<CertificateRecord>> {
        Ok(self.config.read().await.platform_ssl_cert_infos.clone())
    }

    async fn save_records(&self, records: &[CertificateRecord]) -> CoreResult<()> {
        let mut config = self.config.write().await;

        let mut updated = config.clone();
        updated.platform_ssl_cert_infos = records.to_vec();
        updated.save().await?;

        *config = updated;
        log::debug!(
            "Saved {} certificate record(s) to {}",
            records.len(),
            config.config_path.display()
        );
        Ok(())
    }
}
