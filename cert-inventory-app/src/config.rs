//! Application configuration document.
//!
//! One JSON file holds both the settings and the persisted certificate inventory
//! (`platformSslCertInfos`). Every field has a default, so a partial or missing
//! document still loads. A document that exists but cannot be read or parsed
//! also loads as defaults, but read-only: saving it fails instead of replacing
//! the user's file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cert_inventory_core::error::{CoreError, CoreResult};
use cert_inventory_core::types::CertificateRecord;

/// Default location of the configuration document.
pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";

/// Application configuration plus the persisted inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Where this document was loaded from and will be saved to.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Why the file at `config_path` exists but could not be loaded.
    /// A config with a load error is read-only.
    #[serde(skip)]
    pub load_error: Option<String>,

    /// HTTP port; `0` disables the server.
    pub port: u16,
    /// Credential file, one `platform@@secretId@@secretKey[@@accountId]` per line.
    pub key_text_file: String,
    pub log_path: String,
    pub enable_log_to_file: bool,

    /// Local directories to scan for certificates.
    pub ssl_cert_path_list: Vec<String>,
    pub ssl_cert_path_max_depth: usize,

    /// The certificate inventory.
    pub platform_ssl_cert_infos: Vec<CertificateRecord>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            load_error: None,
            port: 30900,
            key_text_file: "data/key.txt".to_string(),
            log_path: "data/logs".to_string(),
            enable_log_to_file: false,
            ssl_cert_path_list: Vec::new(),
            ssl_cert_path_max_depth: 2,
            platform_ssl_cert_infos: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load the document at `path`.
    ///
    /// Never fatal. A missing file gives defaults. An unreadable or malformed
    /// file gives read-only defaults with [`load_error`](Self::load_error) set.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        log::info!("Loading config file: {}", path.display());

        let mut config = if path.exists() {
            let loaded = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|json| serde_json::from_str::<Self>(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to load config file {}, using defaults without saving: {e}",
                        path.display()
                    );
                    Self {
                        load_error: Some(e),
                        ..Self::default()
                    }
                }
            }
        } else {
            log::info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            Self::default()
        };

        config.config_path = path.to_path_buf();
        config
    }

    /// Whether saving is refused because the existing file could not be loaded.
    pub fn is_read_only(&self) -> bool {
        self.load_error.is_some()
    }

    /// Pretty-printed JSON form of the document.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(CoreError::from)
    }

    /// Write the document to `config_path`, creating the parent directory if needed.
    ///
    /// # Errors
    /// `StorageError` when the document is read-only or the write fails.
    pub async fn save(&self) -> CoreResult<()> {
        if self.is_read_only() {
            return Err(CoreError::StorageError(format!(
                "Config file {} could not be loaded, refusing to overwrite it",
                self.config_path.display()
            )));
        }

        let json = self.to_json_pretty()?;
        if let Some(parent) = self.config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::StorageError(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(&self.config_path, json).await.map_err(|e| {
            CoreError::StorageError(format!(
                "Failed to write {}: {e}",
                self.config_path.display()
            ))
        })?;
        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }
}
