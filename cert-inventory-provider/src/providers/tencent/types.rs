//! Tencent Cloud SSL API type definitions

use serde::{Deserialize, Deserializer, Serialize};

// ============ Response envelope ============

/// Generic Tencent Cloud response envelope: `{"Response": {...}}`.
#[derive(Debug, Deserialize)]
pub struct TencentResponse<T> {
    #[serde(rename = "Response")]
    pub response: Option<TencentResponseBody<T>>,
}

/// Body of the envelope: action data plus the common `Error` / `RequestId` fields.
#[derive(Debug, Deserialize)]
pub struct TencentResponseBody<T> {
    #[serde(rename = "Error")]
    pub error: Option<TencentError>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

/// Error payload nested inside Tencent Cloud responses.
#[derive(Debug, Deserialize)]
pub struct TencentError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

// ============ DescribeCertificates ============

/// Request body for `DescribeCertificates`.
#[derive(Debug, Default, Serialize)]
pub struct DescribeCertificatesRequest {
    #[serde(rename = "Offset", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(rename = "Limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "SearchKey", skip_serializing_if = "Option::is_none")]
    pub search_key: Option<String>,
    #[serde(rename = "CertificateStatus", skip_serializing_if = "Option::is_none")]
    pub certificate_status: Option<Vec<u64>>,
    #[serde(rename = "CertIds", skip_serializing_if = "Option::is_none")]
    pub cert_ids: Option<Vec<String>>,
    /// `ASC` / `DESC` on expiry time
    #[serde(rename = "ExpirationSort", skip_serializing_if = "Option::is_none")]
    pub expiration_sort: Option<String>,
}

/// Response payload for `DescribeCertificates`.
#[derive(Debug, Default, Deserialize)]
pub struct DescribeCertificatesResponse {
    #[serde(rename = "Certificates", default)]
    pub certificates: Option<Vec<TencentCertificate>>,
    #[serde(rename = "TotalCount", default)]
    pub total_count: Option<u32>,
}

/// Certificate item returned by `DescribeCertificates`.
///
/// Numeric fields are sometimes sent as strings, so they go through lenient deserializers.
#[derive(Debug, Deserialize)]
pub struct TencentCertificate {
    #[serde(rename = "CertificateId")]
    pub certificate_id: String,
    #[serde(rename = "Domain", default)]
    pub domain: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "StatusName", default)]
    pub status_name: Option<String>,
    #[serde(rename = "StatusMsg", default)]
    pub status_msg: Option<String>,
    #[serde(rename = "Alias", default)]
    pub alias: Option<String>,
    #[serde(rename = "CertBeginTime", default)]
    pub cert_begin_time: Option<String>,
    #[serde(rename = "CertEndTime", default)]
    pub cert_end_time: Option<String>,
    #[serde(rename = "InsertTime", default)]
    pub insert_time: Option<String>,
    #[serde(rename = "ValidityPeriod", default, deserialize_with = "lenient_u32")]
    pub validity_period: Option<u32>,
    #[serde(rename = "IsIgnore", default)]
    pub is_ignore: Option<bool>,
    #[serde(rename = "From", default)]
    pub from: Option<String>,
    #[serde(rename = "OwnerUin", default, deserialize_with = "lenient_string")]
    pub owner_uin: Option<String>,
    #[serde(rename = "VerifyType", default)]
    pub verify_type: Option<String>,
}

// ============ DescribeDownloadCertificateUrl ============

/// Request body for `DescribeDownloadCertificateUrl`.
#[derive(Debug, Serialize)]
pub struct DescribeDownloadCertificateUrlRequest<'a> {
    #[serde(rename = "CertificateId")]
    pub certificate_id: &'a str,
    #[serde(rename = "ServiceType")]
    pub service_type: &'a str,
}

/// Response payload for `DescribeDownloadCertificateUrl`.
#[derive(Debug, Default, Deserialize)]
pub struct DescribeDownloadCertificateUrlResponse {
    #[serde(rename = "DownloadCertificateUrl", default)]
    pub download_certificate_url: Option<String>,
    #[serde(rename = "DownloadFilename", default)]
    pub download_filename: Option<String>,
}

// ============ Lenient scalar deserializers ============

/// 接受字符串或数字，统一为 `String`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        },
    )
}

/// 接受数字或数字字符串；无法解析时为 `None`
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        },
    )
}
