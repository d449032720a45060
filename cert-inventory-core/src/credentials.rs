//! 云平台 API 凭证文件
//!
//! 每行一个凭证：`platform@@secretId@@secretKey[@@accountId]`。
//! 空行和以 `#` 开头的行被忽略。

use std::path::Path;

use cert_inventory_provider::log_sanitizer::mask_secret;

use crate::types::{ApiCredential, CloudPlatform};

const FIELD_SEPARATOR: &str = "@@";

/// 解析凭证文本
///
/// 字段不足 3 个、平台不受支持、`secretId` 或 `secretKey` 为空的行都会被跳过。
pub fn parse_credentials(text: &str) -> Vec<ApiCredential> {
    let mut credentials = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if parts.len() < 3 {
            log::debug!("Credential line {} has fewer than 3 fields, skipped", index + 1);
            continue;
        }

        let platform = match parts[0].parse::<CloudPlatform>() {
            Ok(platform) => platform,
            Err(e) => {
                log::warn!("Credential line {}: {e}", index + 1);
                continue;
            }
        };

        let (secret_id, secret_key) = (parts[1], parts[2]);
        if secret_id.is_empty() || secret_key.is_empty() {
            log::warn!(
                "Credential line {}: empty secretId or secretKey, skipped",
                index + 1
            );
            continue;
        }
        let account_id = parts.get(3).copied().unwrap_or_default();

        log::info!(
            "Loaded API credential: {platform} - {} - {account_id}",
            mask_secret(secret_id)
        );
        credentials.push(ApiCredential::new(platform, secret_id, secret_key, account_id));
    }

    credentials
}

/// 从文件加载凭证
///
/// 文件不存在或无法读取时返回空列表并记录警告。
pub fn load_credentials_file(path: impl AsRef<Path>) -> Vec<ApiCredential> {
    let path = path.as_ref();

    if !path.is_file() {
        log::warn!("API credential file not found: {}", path.display());
        return Vec::new();
    }

    match std::fs::read_to_string(path) {
        Ok(text) => {
            let credentials = parse_credentials(&text);
            log::info!(
                "Loaded {} API credential(s) from {}",
                credentials.len(),
                path.display()
            );
            credentials
        }
        Err(e) => {
            log::warn!(
                "Failed to read API credential file {}: {e}",
                path.display()
            );
            Vec::new()
        }
    }
}
