//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cert_inventory_provider::{
    CertificatePage, CertificateSource, DownloadUrl, ListCertificatesParams, ProviderError,
    Result as ProviderResult,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::{InventoryStore, SourceFactory};
use crate::types::{ApiCredential, CertificateRecord, CloudCertificate, CloudPlatform};

// ===== MockInventoryStore =====

pub struct MockInventoryStore {
    records: RwLock<Vec<CertificateRecord>>,
    /// 如果 Some，save 时返回此错误
    save_error: RwLock<Option<String>>,
    save_count: RwLock<usize>,
}

impl MockInventoryStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<CertificateRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            save_error: RwLock::new(None),
            save_count: RwLock::new(0),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn records(&self) -> Vec<CertificateRecord> {
        self.records.read().await.clone()
    }

    pub async fn save_count(&self) -> usize {
        *self.save_count.read().await
    }
}

#[async_trait]
impl InventoryStore for MockInventoryStore {
    async fn load_records(&self) -> CoreResult<Vec<CertificateRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn save_records(&self, records: &[CertificateRecord]) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        *self.records.write().await = records.to_vec();
        *self.save_count.write().await += 1;
        Ok(())
    }
}

// ===== MockCertificateSource =====

/// 固定返回一组证书（或一个错误）的平台
pub struct MockCertificateSource {
    result: Result<Vec<CloudCertificate>, ProviderError>,
}

impl MockCertificateSource {
    pub fn ok(certificates: Vec<CloudCertificate>) -> Self {
        Self {
            result: Ok(certificates),
        }
    }

    pub fn err(error: ProviderError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl CertificateSource for MockCertificateSource {
    fn platform(&self) -> CloudPlatform {
        CloudPlatform::Tencent
    }

    async fn list_certificates(
        &self,
        params: &ListCertificatesParams,
    ) -> ProviderResult<CertificatePage> {
        let all = self.result.clone()?;
        let total_count = u32::try_from(all.len()).unwrap_or(u32::MAX);
        let offset = params.offset.unwrap_or(0) as usize;
        let limit = params.limit.unwrap_or(20) as usize;
        Ok(CertificatePage {
            items: all.into_iter().skip(offset).take(limit).collect(),
            total_count,
        })
    }

    async fn get_download_url(
        &self,
        certificate_id: &str,
        _service_type: &str,
    ) -> ProviderResult<DownloadUrl> {
        Ok(DownloadUrl {
            url: format!("https://download.example.com/{certificate_id}.zip"),
            filename: format!("{certificate_id}.zip"),
        })
    }
}

// ===== MockSourceFactory =====

/// 按 `secret_id` 返回预设 source
pub struct MockSourceFactory {
    sources: HashMap<String, Arc<dyn CertificateSource>>,
}

impl MockSourceFactory {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    pub fn with(mut self, secret_id: &str, source: MockCertificateSource) -> Self {
        self.sources.insert(secret_id.to_string(), Arc::new(source));
        self
    }
}

impl SourceFactory for MockSourceFactory {
    fn create(&self, credential: &ApiCredential) -> Arc<dyn CertificateSource> {
        self.sources
            .get(&credential.secret_id)
            .cloned()
            .unwrap_or_else(|| Arc::new(MockCertificateSource::ok(Vec::new())))
    }
}

// ===== 工厂方法 =====

pub fn credential(secret_id: &str, account_id: &str) -> ApiCredential {
    ApiCredential::new(CloudPlatform::Tencent, secret_id, "secret", account_id)
}

pub fn cloud_cert(certificate_id: &str, domain: &str) -> CloudCertificate {
    CloudCertificate {
        certificate_id: certificate_id.to_string(),
        domain: domain.to_string(),
        status: Some("1".to_string()),
        status_name: Some("已通过".to_string()),
        status_msg: None,
        alias: None,
        begin_time_at: Some(1_537_272_000_000),
        insert_time_at: Some(1_537_272_000_000),
        end_time_at: Some(1_568_808_000_000),
        validity_period_months: Some(12),
        is_ignore: false,
        from: Some("trustasia".to_string()),
        owner_uin: None,
        verify_type: Some("DNS_AUTO".to_string()),
    }
}
