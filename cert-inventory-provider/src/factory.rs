//! Certificate source factory.

use std::sync::Arc;

use crate::providers::TencentSslProvider;
use crate::traits::CertificateSource;
use crate::types::{ApiCredential, CloudPlatform};

/// Creates a [`CertificateSource`] for the credential's platform.
///
/// The returned source is wrapped in `Arc<dyn CertificateSource>` so it can be
/// shared across concurrent refresh tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use cert_inventory_provider::{create_source, ApiCredential, CloudPlatform};
///
/// let source = create_source(&ApiCredential::new(
///     CloudPlatform::Tencent,
///     "AKID...",
///     "secret",
///     "100000000001",
/// ));
/// assert_eq!(source.platform(), CloudPlatform::Tencent);
/// ```
pub fn create_source(credential: &ApiCredential) -> Arc<dyn CertificateSource> {
    match credential.platform {
        CloudPlatform::Tencent => Arc::new(TencentSslProvider::new(credential.clone())),
    }
}
