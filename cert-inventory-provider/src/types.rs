//! Public types shared by every cloud certificate platform.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============ Platform & Credential Types ============

/// Supported cloud certificate platforms.
///
/// Serialized as lowercase strings (`"tencent"`). Adding a platform means adding a
/// variant here and a matching arm in [`create_source`](crate::create_source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudPlatform {
    /// Tencent Cloud SSL certificate service.
    Tencent,
}

impl CloudPlatform {
    /// All platforms this build can talk to.
    pub const ALL: &'static [Self] = &[Self::Tencent];

    /// Wire / config name of the platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tencent => "tencent",
        }
    }
}

impl std::fmt::Display for CloudPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a platform name is not in the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedPlatform(pub String);

impl std::fmt::Display for UnsupportedPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unsupported cloud platform: {}", self.0)
    }
}

impl std::error::Error for UnsupportedPlatform {}

impl FromStr for CloudPlatform {
    type Err = UnsupportedPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnsupportedPlatform(s.to_string()))
    }
}

/// API credential for one account on one platform.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCredential {
    pub platform: CloudPlatform,
    pub secret_id: String,
    pub secret_key: String,
    /// Account identifier used to tag records; may be empty.
    #[serde(default)]
    pub account_id: String,
}

impl ApiCredential {
    #[must_use]
    pub fn new(
        platform: CloudPlatform,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            account_id: account_id.into(),
        }
    }
}

// secret_key 不能出现在日志里
impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredential")
            .field("platform", &self.platform)
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"***")
            .field("account_id", &self.account_id)
            .finish()
    }
}

// ============ Query Types ============

/// Sort direction on certificate expiry time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Earliest expiry first.
    Asc,
    /// Latest expiry first.
    Desc,
}

/// Filters and paging for [`CertificateSource::list_certificates`](crate::CertificateSource::list_certificates).
///
/// Every field is optional; an all-`None` value asks the platform for its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCertificatesParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// Fuzzy match on certificate ID, alias or domain.
    pub search_key: Option<String>,
    /// Platform status codes to include.
    pub status_filter: Option<Vec<u64>>,
    /// Only return these certificate IDs.
    pub cert_ids: Option<Vec<String>>,
    /// Sort on expiry time; platform default ordering when `None`.
    pub sort_order: Option<SortOrder>,
}

impl ListCertificatesParams {
    /// One page starting at `offset`.
    #[must_use]
    pub fn page(offset: u32, limit: u32) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
            ..Self::default()
        }
    }
}

// ============ Result Types ============

/// A certificate as registered on a cloud platform.
///
/// Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudCertificate {
    pub certificate_id: String,
    pub domain: String,
    /// Platform status code, e.g. `"1"` for issued.
    pub status: Option<String>,
    pub status_name: Option<String>,
    pub status_msg: Option<String>,
    /// User-set remark.
    pub alias: Option<String>,
    pub begin_time_at: Option<i64>,
    pub insert_time_at: Option<i64>,
    pub end_time_at: Option<i64>,
    /// Validity period in months.
    pub validity_period_months: Option<u32>,
    /// Whether expiry notifications are ignored.
    pub is_ignore: bool,
    /// Issuer / origin (`upload`, `trustasia`, ...).
    pub from: Option<String>,
    pub owner_uin: Option<String>,
    pub verify_type: Option<String>,
}

/// One page of certificates plus the platform-side total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePage {
    pub items: Vec<CloudCertificate>,
    pub total_count: u32,
}

/// Temporary download link for a certificate archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrl {
    pub url: String,
    pub filename: String,
}
