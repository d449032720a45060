//! 腾讯云 SSL 证书 Provider

mod error;
mod http;
mod provider;
pub(crate) mod sign;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;
use crate::types::ApiCredential;

pub(crate) const PROVIDER_NAME: &str = "tencent";
pub(crate) const SSL_API_HOST: &str = "ssl.tencentcloudapi.com";
pub(crate) const SSL_SERVICE: &str = "ssl";
pub(crate) const SSL_VERSION: &str = "2019-12-05";
pub(crate) const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// 腾讯云 SSL 证书 Provider
pub struct TencentSslProvider {
    pub(crate) client: Client,
    pub(crate) credential: ApiCredential,
    /// 请求地址，默认 `https://ssl.tencentcloudapi.com`
    pub(crate) endpoint: String,
}

/// `TencentSslProvider` Builder
pub struct TencentSslProviderBuilder {
    credential: ApiCredential,
    endpoint: String,
}

impl TencentSslProviderBuilder {
    fn new(credential: ApiCredential) -> Self {
        Self {
            credential,
            endpoint: format!("https://{SSL_API_HOST}"),
        }
    }

    /// 覆盖请求地址（签名中的 host 不变）
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn build(self) -> TencentSslProvider {
        TencentSslProvider {
            client: create_http_client(),
            credential: self.credential,
            endpoint: self.endpoint,
        }
    }
}

impl TencentSslProvider {
    pub fn new(credential: ApiCredential) -> Self {
        Self::builder(credential).build()
    }

    pub fn builder(credential: ApiCredential) -> TencentSslProviderBuilder {
        TencentSslProviderBuilder::new(credential)
    }
}
