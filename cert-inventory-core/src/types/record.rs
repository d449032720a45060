//! 持久化证书记录

use serde::{Deserialize, Serialize};

use cert_inventory_provider::CloudPlatform;

/// 一个域名的证书记录（清单中的一项）
///
/// `domain` 是合并键，清单中每个域名至多一条。时间字段均为 Unix 毫秒。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    /// 8 位字母数字 ID，首次发现时生成，之后不再改变
    #[serde(default)]
    pub id: String,
    pub domain: String,

    // ---- 云端字段 ----
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_platform: Option<CloudPlatform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_status_name: Option<String>,
    /// 云端备注
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_at: Option<i64>,
    /// 本地扫描和云端查询都会写入，以最近一次观察为准
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_time_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_days: Option<u32>,

    /// 用户开关；新记录为 `false`，合并时从不覆盖
    #[serde(default)]
    pub enable: bool,

    // ---- 本地字段 ----
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_parent_fold_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crt_filename: Option<String>,

    /// 最近一次被任一来源观察到的时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<i64>,
}

impl CertificateRecord {
    /// 新发现的域名
    #[must_use]
    pub fn new(id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
            enable: false,
            ..Self::default()
        }
    }
}
