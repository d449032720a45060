//! SSL Certificate Inventory Core Library
//!
//! Provides the core business logic for the certificate inventory:
//! - Local certificate scanning (`scanner`)
//! - Merging observations into the persisted inventory (`reconcile`)
//! - Credential file parsing (`credentials`)
//! - `InventoryService`, running the local and cloud refresh flows under one writer lock
//!
//! This library is platform-independent; persistence is abstracted through the
//! [`InventoryStore`] trait.

pub mod credentials;
pub mod error;
pub mod reconcile;
pub mod scanner;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{InventoryService, RefreshSummary, ServiceContext};
pub use traits::{InventoryStore, PlatformSourceFactory, SourceFactory};
