//! Inventory persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::CertificateRecord;

/// Certificate inventory store Trait
///
/// The inventory is read and written as a whole set; there is no per-record update.
///
/// Platform implementation:
/// - `JsonConfigStore` (cert-inventory-app): `platformSslCertInfos` inside the JSON config document
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Load the full persisted record set
    async fn load_records(&self) -> CoreResult<Vec<CertificateRecord>>;

    /// Replace the persisted record set
    ///
    /// # Arguments
    /// * `records` - the complete new set, in output order
    async fn save_records(&self, records: &[CertificateRecord]) -> CoreResult<()>;
}
