//! Certificate source factory abstract Trait

use std::sync::Arc;

use cert_inventory_provider::{ApiCredential, CertificateSource, create_source};

/// Creates a [`CertificateSource`] for one credential
///
/// Provides the default `PlatformSourceFactory`, which dispatches on the credential's platform.
pub trait SourceFactory: Send + Sync {
    /// Build a source bound to `credential`
    fn create(&self, credential: &ApiCredential) -> Arc<dyn CertificateSource>;
}

/// Default factory backed by [`create_source`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformSourceFactory;

impl SourceFactory for PlatformSourceFactory {
    fn create(&self, credential: &ApiCredential) -> Arc<dyn CertificateSource> {
        create_source(credential)
    }
}
