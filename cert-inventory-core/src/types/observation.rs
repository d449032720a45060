//! 观察结果：本地扫描或云端查询得到的一条关于某个域名的事实

use std::path::PathBuf;

use serde::Serialize;

use cert_inventory_provider::{CloudCertificate, CloudPlatform};

/// 本地磁盘上找到的证书/私钥对
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalCertificate {
    pub domain: String,
    #[serde(rename = "keyFile")]
    pub key_path: PathBuf,
    #[serde(rename = "crtFile")]
    pub crt_path: PathBuf,
    /// 证书 `notAfter`（Unix 毫秒）
    pub expire_time_at: i64,
}

/// 一次观察
#[derive(Debug, Clone)]
pub enum Observation {
    Local(LocalCertificate),
    Cloud {
        platform: CloudPlatform,
        account_id: String,
        certificate: CloudCertificate,
    },
}

impl Observation {
    /// 合并键
    #[must_use]
    pub fn domain(&self) -> &str {
        match self {
            Self::Local(local) => &local.domain,
            Self::Cloud { certificate, .. } => &certificate.domain,
        }
    }
}
