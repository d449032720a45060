//! Provider 公共工具函数

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::{Digest, Sha256};

use crate::error::{ProviderError, Result};

type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

/// 连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
/// 请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// 创建带超时配置的 HTTP Client
///
/// TLS 后端初始化失败时退回默认 Client（无超时），并记录警告。
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build HTTP client with timeouts, using defaults: {e}");
            Client::new()
        })
}

// ============ Hashing ============

/// HMAC-SHA256 计算
///
/// `hmac` 对任意长度的 key 都接受；这里仍然把 `InvalidLength` 映射为签名错误，不 panic。
pub fn hmac_sha256(key: &[u8], data: &[u8], provider: &str) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| ProviderError::SigningError {
        provider: provider.to_string(),
        detail: format!("invalid HMAC key: {e}"),
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// 小写十六进制 SHA-256 摘要
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
