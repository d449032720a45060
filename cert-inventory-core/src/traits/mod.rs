//! Storage layer abstraction trait definition

mod inventory_store;
mod source_factory;

pub use inventory_store::InventoryStore;
pub use source_factory::{PlatformSourceFactory, SourceFactory};
