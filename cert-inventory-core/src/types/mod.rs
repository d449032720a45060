//! 类型定义模块

mod observation;
mod record;

pub use observation::{LocalCertificate, Observation};
pub use record::CertificateRecord;

// Re-export provider 库的公共类型
pub use cert_inventory_provider::{ApiCredential, CloudCertificate, CloudPlatform};
