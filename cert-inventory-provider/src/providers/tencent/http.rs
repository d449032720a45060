//! 腾讯云 SSL HTTP 请求方法

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::sign::{SignParams, sign};
use super::types::TencentResponse;
use super::{SSL_API_HOST, SSL_SERVICE, SSL_VERSION, TencentSslProvider};

impl TencentSslProvider {
    /// 执行一次 SSL API 请求
    ///
    /// 响应体为空（或缺少 `Response`）时返回 `Ok(None)`。只发一次，不重试。
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<Option<T>> {
        // 1. 序列化请求体
        let payload =
            serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            })?;

        log::debug!("[{}] Request Body: {payload}", self.provider_name());

        // 2. 签名；失败则不发请求
        let auth = sign(&SignParams {
            action,
            payload: &payload,
            secret_id: &self.credential.secret_id,
            secret_key: &self.credential.secret_key,
            service: SSL_SERVICE,
            host: SSL_API_HOST,
            timestamp: Utc::now().timestamp(),
        })?;

        // 3. 发送请求
        let request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", auth.content_type)
            .header("Authorization", auth.authorization)
            .header("X-TC-Action", auth.action)
            .header("X-TC-Version", SSL_VERSION)
            .header("X-TC-Timestamp", auth.timestamp)
            .body(payload);

        let (_status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("Action: {action}"),
        )
        .await?;

        // 4. 解析响应
        self.decode_response(&response_text, ctx)
    }

    /// 解析 `{"Response": {...}}` 信封
    ///
    /// 空响应体返回 `Ok(None)`；`Response.Error` 存在时映射为 [`ProviderError`]。
    pub(crate) fn decode_response<T: DeserializeOwned>(
        &self,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<Option<T>> {
        if response_text.trim().is_empty() {
            log::warn!("[{}] Empty response body", self.provider_name());
            return Ok(None);
        }

        let envelope: TencentResponse<T> =
            HttpUtils::parse_json(response_text, self.provider_name())?;

        let Some(body) = envelope.response else {
            log::warn!("[{}] Response envelope missing", self.provider_name());
            return Ok(None);
        };

        if let Some(error) = body.error {
            log::warn!(
                "[{}] API error: {} - {} (RequestId: {})",
                self.provider_name(),
                error.code,
                error.message,
                body.request_id.as_deref().unwrap_or("-")
            );
            return Err(self.map_error(RawApiError::with_code(error.code, error.message), ctx));
        }

        Ok(Some(body.data))
    }
}
