//! 腾讯云 TC3-HMAC-SHA256 签名
//!
//! 只签 `content-type` 与 `host` 两个头，`X-TC-Action` 等由调用方另行附加。

use chrono::DateTime;

use crate::error::{ProviderError, Result};
use crate::providers::common::{hmac_sha256, sha256_hex};

use super::{CONTENT_TYPE, PROVIDER_NAME};

const ALGORITHM: &str = "TC3-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host";
const TC3_REQUEST: &str = "tc3_request";

/// 签名输入
#[derive(Debug, Clone, Copy)]
pub struct SignParams<'a> {
    /// API Action，例如 `DescribeCertificates`
    pub action: &'a str,
    /// 请求体（JSON 字符串），按原样参与摘要
    pub payload: &'a str,
    pub secret_id: &'a str,
    pub secret_key: &'a str,
    /// 服务名，例如 `ssl`
    pub service: &'a str,
    /// 服务域名，例如 `ssl.tencentcloudapi.com`
    pub host: &'a str,
    /// Unix 秒
    pub timestamp: i64,
}

/// 签名结果，对应需要随请求发送的头部
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub authorization: String,
    pub content_type: String,
    pub action: String,
    pub timestamp: String,
}

/// 规范请求串
pub(crate) fn canonical_request(host: &str, payload: &str) -> String {
    format!(
        "POST\n/\n\ncontent-type:{CONTENT_TYPE}\nhost:{host}\n\n{SIGNED_HEADERS}\n{}",
        sha256_hex(payload.as_bytes())
    )
}

/// 计算 TC3-HMAC-SHA256 签名并组装请求头
///
/// 纯函数：相同输入得到相同输出。时间戳超出可表示的日期范围时返回
/// [`ProviderError::SigningError`]，调用方不应发出未签名的请求。
pub fn sign(params: &SignParams<'_>) -> Result<AuthHeaders> {
    let date = DateTime::from_timestamp(params.timestamp, 0)
        .ok_or_else(|| ProviderError::SigningError {
            provider: PROVIDER_NAME.to_string(),
            detail: format!("timestamp {} out of range", params.timestamp),
        })?
        .format("%Y-%m-%d")
        .to_string();

    // 1. 规范请求串
    let canonical_request = canonical_request(params.host, params.payload);

    // 2. 待签名字符串
    let credential_scope = format!("{date}/{}/{TC3_REQUEST}", params.service);
    let string_to_sign = format!(
        "{ALGORITHM}\n{}\n{credential_scope}\n{}",
        params.timestamp,
        sha256_hex(canonical_request.as_bytes())
    );

    // 3. 派生签名密钥并签名
    let secret_date = hmac_sha256(
        format!("TC3{}", params.secret_key).as_bytes(),
        date.as_bytes(),
        PROVIDER_NAME,
    )?;
    let secret_service = hmac_sha256(&secret_date, params.service.as_bytes(), PROVIDER_NAME)?;
    let secret_signing = hmac_sha256(&secret_service, TC3_REQUEST.as_bytes(), PROVIDER_NAME)?;
    let signature = hex::encode(hmac_sha256(
        &secret_signing,
        string_to_sign.as_bytes(),
        PROVIDER_NAME,
    )?);

    // 4. Authorization
    let authorization = format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        params.secret_id
    );

    Ok(AuthHeaders {
        authorization,
        content_type: CONTENT_TYPE.to_string(),
        action: params.action.to_string(),
        timestamp: params.timestamp.to_string(),
    })
}
