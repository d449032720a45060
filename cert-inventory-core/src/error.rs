//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use cert_inventory_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Storage layer error (reading or writing the persisted inventory)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Platform name not in the supported set
    #[error("Unsupported cloud platform: {0}")]
    UnsupportedPlatform(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, bad credentials, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) | Self::UnsupportedPlatform(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::StorageError(_) | Self::SerializationError(_) => false,
        }
    }
}

impl From<cert_inventory_provider::UnsupportedPlatform> for CoreError {
    fn from(e: cert_inventory_provider::UnsupportedPlatform) -> Self {
        Self::UnsupportedPlatform(e.0)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_converts_and_keeps_message() {
        let err: CoreError = ProviderError::Timeout {
            provider: "tencent".to_string(),
            detail: "5s".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "[tencent] Request timeout: 5s");
        assert!(!err.is_expected());
    }

    #[test]
    fn unsupported_platform_is_expected() {
        let err: CoreError = "aliyun"
            .parse::<cert_inventory_provider::CloudPlatform>()
            .unwrap_err()
            .into();
        assert!(matches!(err, CoreError::UnsupportedPlatform(ref p) if p == "aliyun"));
        assert!(err.is_expected());
    }

    #[test]
    fn serializes_with_code_and_details() {
        let json = serde_json::to_value(CoreError::StorageError("disk full".into())).unwrap();
        assert_eq!(json["code"], "StorageError");
        assert_eq!(json["details"], "disk full");
    }
}
