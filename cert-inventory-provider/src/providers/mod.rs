//! Cloud certificate platform implementations

/// Shared utilities used by platform implementations.
pub mod common;

mod tencent;

pub use tencent::sign::{AuthHeaders, SignParams, sign};
pub use tencent::{TencentSslProvider, TencentSslProviderBuilder};
