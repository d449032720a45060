//! Storage adapters for the certificate inventory.

mod json_config_store;

pub use json_config_store::JsonConfigStore;
