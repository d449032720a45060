//! # cert-inventory-provider
//!
//! Cloud certificate platform abstraction: list the certificates registered on a
//! cloud account and fetch download links for them.
//!
//! ## Supported Platforms
//!
//! | Platform | Service | Auth Method |
//! |----------|---------|-------------|
//! | [Tencent Cloud SSL](https://cloud.tencent.com/product/ssl) | `ssl.tencentcloudapi.com` (`2019-12-05`) | TC3-HMAC-SHA256 |
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)* — Use rustls.
//! - **`native-tls`** — Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cert_inventory_provider::{create_source, ApiCredential, CloudPlatform};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credential = ApiCredential::new(
//!         CloudPlatform::Tencent,
//!         "AKID...",
//!         "secret",
//!         "100000000001",
//!     );
//!     let source = create_source(&credential);
//!
//!     for cert in source.list_all_certificates().await? {
//!         println!("{} {} expires {:?}", cert.certificate_id, cert.domain, cert.end_time_at);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`] — authentication failed
//! - [`ProviderError::CertificateNotFound`] — unknown certificate ID
//! - [`ProviderError::Timeout`] / [`ProviderError::NetworkError`] — transport failure
//! - [`ProviderError::Unknown`] — unmapped platform error, raw `Code` kept
//!
//! Each call is sent once; nothing is retried.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory function
pub use factory::create_source;

// Re-export core trait only (internal traits are not exported)
pub use traits::{CertificateSource, LIST_ALL_PAGE_SIZE};

// Re-export types
pub use types::{
    ApiCredential, CertificatePage, CloudCertificate, CloudPlatform, DownloadUrl,
    ListCertificatesParams, SortOrder, UnsupportedPlatform,
};

// Re-export signing and concrete platforms
pub use providers::{AuthHeaders, SignParams, TencentSslProvider, TencentSslProviderBuilder, sign};

// Re-export utils modules
pub use utils::datetime;
pub use utils::log_sanitizer;
