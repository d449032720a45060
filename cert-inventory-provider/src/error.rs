use serde::{Deserialize, Serialize};

/// Unified error type for all cloud certificate platform operations.
///
/// Each variant includes a `provider` field identifying which platform produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// Transport failures ([`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout))
/// are reported once per call. The HTTP layer never retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Platform that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Platform that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials are invalid or expired.
    InvalidCredentials {
        /// Platform that produced the error.
        provider: String,
        /// Original error message from the platform API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded.
    RateLimited {
        /// Platform that produced the error.
        provider: String,
        /// Original error message from the platform API, if available.
        raw_message: Option<String>,
    },

    /// The account's resource quota has been exceeded.
    QuotaExceeded {
        /// Platform that produced the error.
        provider: String,
        /// Original error message from the platform API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated account lacks permission for the requested operation.
    PermissionDenied {
        /// Platform that produced the error.
        provider: String,
        /// Original error message from the platform API, if available.
        raw_message: Option<String>,
    },

    /// The referenced certificate does not exist on the platform.
    CertificateNotFound {
        /// Platform that produced the error.
        provider: String,
        /// Certificate ID that was not found.
        certificate_id: String,
        /// Original error message from the platform API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected by the platform.
    InvalidParameter {
        /// Platform that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the platform's API response.
    ParseError {
        /// Platform that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Platform that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The request could not be signed. The request is never sent in this case.
    SigningError {
        /// Platform that produced the error.
        provider: String,
        /// Details about the signing failure.
        detail: String,
    },

    /// An unrecognized error from the platform API.
    ///
    /// Catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Platform that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证错误、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::QuotaExceeded { .. }
                | Self::PermissionDenied { .. }
                | Self::CertificateNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::RateLimited { provider, .. } => {
                write!(f, "[{provider}] Rate limited")
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Quota exceeded")
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::CertificateNotFound {
                provider,
                certificate_id,
                ..
            } => {
                write!(f, "[{provider}] Certificate '{certificate_id}' not found")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::SigningError { provider, detail } => {
                write!(f, "[{provider}] Signing error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_code,
                raw_message,
            } => {
                if let Some(code) = raw_code {
                    write!(f, "[{provider}] {code}: {raw_message}")
                } else {
                    write!(f, "[{provider}] {raw_message}")
                }
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
