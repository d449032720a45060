//! Tencent Cloud SSL error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{PROVIDER_NAME, TencentSslProvider};

/// Tencent Cloud SSL error code mapping
/// Reference: <https://cloud.tencent.com/document/api/400/41675>
///
/// Codes are `Category` or `Category.Detail`; most arms match on the category prefix.
impl ProviderErrorMapper for TencentSslProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let Some(code) = raw.code.as_deref() else {
            return self.unknown_error(raw);
        };
        let category = code.split('.').next().unwrap_or(code);

        match (category, code) {
            // ============ Authentication error ============
            ("AuthFailure", _) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Frequency limit ============
            ("RequestLimitExceeded", _) => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Quota limit ============
            ("LimitExceeded", _) => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Permission denied ============
            ("UnauthorizedOperation" | "OperationDenied", _) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Certificate does not exist ============
            ("ResourceNotFound", _) | (_, "FailedOperation.CertificateNotFound") => {
                ProviderError::CertificateNotFound {
                    provider: self.provider_name().to_string(),
                    certificate_id: context
                        .certificate_id
                        .unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                }
            }

            // ============ Parameter error ============
            ("InvalidParameter" | "InvalidParameterValue", _) => {
                let param = code
                    .split_once('.')
                    .map_or("<unknown>", |(_, detail)| detail)
                    .to_string();
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param,
                    detail: raw.message,
                }
            }

            // ============ Fallback ============
            _ => self.unknown_error(raw),
        }
    }
}
