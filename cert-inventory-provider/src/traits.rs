//! 云证书平台抽象：`CertificateSource` trait 及内部错误映射

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CertificatePage, CloudCertificate, CloudPlatform, DownloadUrl, ListCertificatesParams,
};

/// `list_all_certificates` 单页大小
pub const LIST_ALL_PAGE_SIZE: u32 = 100;

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各平台格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    #[cfg(test)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 证书 ID（用于 `CertificateNotFound`）
    pub certificate_id: Option<String>,
}

/// 平台错误映射 Trait（内部使用）
/// 各平台实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回平台标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// 云证书平台 Trait
///
/// 每个平台一个实现，通过 [`create_source`](crate::create_source) 按 [`CloudPlatform`] 创建。
#[async_trait]
pub trait CertificateSource: Send + Sync {
    /// 平台标识
    fn platform(&self) -> CloudPlatform;

    /// 分页查询证书列表
    ///
    /// 响应体为空时返回空页，而不是错误。
    async fn list_certificates(&self, params: &ListCertificatesParams) -> Result<CertificatePage>;

    /// 获取证书下载链接
    ///
    /// # Arguments
    /// * `certificate_id` - 平台证书 ID
    /// * `service_type` - 目标服务类型，如 `nginx`、`apache`
    async fn get_download_url(&self, certificate_id: &str, service_type: &str)
    -> Result<DownloadUrl>;

    /// 拉取全部证书
    ///
    /// 默认实现按 [`LIST_ALL_PAGE_SIZE`] 逐页调用 `list_certificates()`，直到凑满 `total_count`
    /// 或遇到空页。第一页失败直接返回错误；之后的页失败则记录日志并保留已取得的结果。
    async fn list_all_certificates(&self) -> Result<Vec<CloudCertificate>> {
        let mut collected: Vec<CloudCertificate> = Vec::new();
        let mut offset = 0_u32;

        loop {
            let params = ListCertificatesParams::page(offset, LIST_ALL_PAGE_SIZE);
            let page = match self.list_certificates(&params).await {
                Ok(page) => page,
                Err(e) if collected.is_empty() => return Err(e),
                Err(e) => {
                    log::warn!(
                        "[{}] Pagination stopped at offset {offset}, keeping {} certificates: {e}",
                        self.platform(),
                        collected.len()
                    );
                    break;
                }
            };

            let fetched = u32::try_from(page.items.len()).unwrap_or(u32::MAX);
            collected.extend(page.items);

            if fetched == 0 || collected.len() >= page.total_count as usize {
                break;
            }
            offset = offset.saturating_add(fetched);
        }

        Ok(collected)
    }
}
