//! 证书清单服务
//!
//! 两条独立的合并流程（本地扫描、云端查询）共用同一把锁，
//! 每次"读取 - 合并 - 写回"都在锁内完成，不会互相覆盖。

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Mutex;

use cert_inventory_provider::log_sanitizer::mask_secret;

use crate::error::{CoreError, CoreResult};
use crate::reconcile::{reconcile, stale_records};
use crate::scanner;
use crate::services::ServiceContext;
use crate::types::{ApiCredential, CertificateRecord, LocalCertificate, Observation};

/// 一次云端刷新的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    /// 查询的凭证数
    pub credentials_queried: usize,
    /// 查询失败的凭证数
    pub credentials_failed: usize,
    /// 成功取得的证书总数
    pub certificates_seen: usize,
}

/// 证书清单服务
pub struct InventoryService {
    ctx: Arc<ServiceContext>,
    /// 单写者锁
    write_lock: Mutex<()>,
}

impl InventoryService {
    /// 创建服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            write_lock: Mutex::new(()),
        }
    }

    /// 当前清单
    pub async fn list_records(&self) -> CoreResult<Vec<CertificateRecord>> {
        self.ctx.inventory_store.load_records().await
    }

    /// 超过 `older_than_millis` 未被观察到的记录
    pub async fn list_stale_records(
        &self,
        older_than_millis: i64,
    ) -> CoreResult<Vec<CertificateRecord>> {
        let records = self.list_records().await?;
        let now = Utc::now().timestamp_millis();
        Ok(stale_records(&records, older_than_millis, now)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 扫描本地目录并合并进清单
    ///
    /// 返回本次扫描到的 `domain -> LocalCertificate`。
    pub async fn refresh_local(
        &self,
        paths: &[String],
        max_depth: usize,
    ) -> CoreResult<BTreeMap<String, LocalCertificate>> {
        let roots = paths.to_vec();
        let scanned = tokio::task::spawn_blocking(move || scanner::scan(&roots, max_depth))
            .await
            .map_err(|e| CoreError::StorageError(format!("Local scan task failed: {e}")))?;

        log::info!("Local scan found {} certificate(s)", scanned.len());

        let observations: Vec<Observation> =
            scanned.values().cloned().map(Observation::Local).collect();
        self.merge_and_save(&observations).await?;

        Ok(scanned)
    }

    /// 查询所有凭证下的云端证书并合并进清单
    ///
    /// 单个凭证失败只记录日志，不影响其余凭证。
    pub async fn refresh_cloud(&self, credentials: &[ApiCredential]) -> CoreResult<RefreshSummary> {
        let mut summary = RefreshSummary {
            credentials_queried: credentials.len(),
            ..RefreshSummary::default()
        };

        if credentials.is_empty() {
            log::warn!("No valid API credentials, skipping cloud certificate query");
            return Ok(summary);
        }

        let results = join_all(credentials.iter().map(|credential| async move {
            let source = self.ctx.source_factory.create(credential);
            (credential, source.list_all_certificates().await)
        }))
        .await;

        let mut observations = Vec::new();
        for (credential, result) in results {
            match result {
                Ok(certificates) => {
                    log::info!(
                        "[{}] {} - {}: {} certificate(s)",
                        credential.platform,
                        mask_secret(&credential.secret_id),
                        credential.account_id,
                        certificates.len()
                    );
                    summary.certificates_seen += certificates.len();
                    observations.extend(certificates.into_iter().map(|certificate| {
                        Observation::Cloud {
                            platform: credential.platform,
                            account_id: credential.account_id.clone(),
                            certificate,
                        }
                    }));
                }
                Err(e) => {
                    summary.credentials_failed += 1;
                    let msg = format!(
                        "Cloud certificate query failed for {} - {} - {}: {e}",
                        credential.platform,
                        mask_secret(&credential.secret_id),
                        credential.account_id
                    );
                    if e.is_expected() {
                        log::warn!("{msg}");
                    } else {
                        log::error!("{msg}");
                    }
                }
            }
        }

        self.merge_and_save(&observations).await?;
        Ok(summary)
    }

    /// 在锁内读取、合并、写回
    async fn merge_and_save(&self, observations: &[Observation]) -> CoreResult<Vec<CertificateRecord>> {
        let _guard = self.write_lock.lock().await;

        let persisted = self.ctx.inventory_store.load_records().await?;
        let merged = reconcile(observations, &persisted, Utc::now().timestamp_millis());

        if let Err(e) = self.ctx.inventory_store.save_records(&merged).await {
            log::error!("Failed to save certificate inventory: {e}");
            return Err(e);
        }

        log::debug!(
            "Inventory saved: {} record(s), {} observation(s) merged",
            merged.len(),
            observations.len()
        );
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cert_inventory_provider::{CloudPlatform, ProviderError};

    use super::*;
    use crate::test_utils::{
        MockCertificateSource, MockInventoryStore, MockSourceFactory, cloud_cert, credential,
    };

    fn service_with(
        store: Arc<MockInventoryStore>,
        factory: MockSourceFactory,
    ) -> InventoryService {
        InventoryService::new(Arc::new(ServiceContext::new(store, Arc::new(factory))))
    }

    #[tokio::test]
    async fn refresh_cloud_merges_all_credentials() {
        let store = Arc::new(MockInventoryStore::new());
        let factory = MockSourceFactory::new()
            .with(
                "ID1",
                MockCertificateSource::ok(vec![cloud_cert("c1", "a.example.com")]),
            )
            .with(
                "ID2",
                MockCertificateSource::ok(vec![
                    cloud_cert("c2", "b.example.com"),
                    cloud_cert("c3", "c.example.com"),
                ]),
            );
        let service = service_with(store.clone(), factory);

        let summary = service
            .refresh_cloud(&[credential("ID1", "1001"), credential("ID2", "1002")])
            .await
            .unwrap();

        assert_eq!(
            summary,
            RefreshSummary {
                credentials_queried: 2,
                credentials_failed: 0,
                certificates_seen: 3,
            }
        );

        let records = store.records().await;
        assert_eq!(records.len(), 3);
        let b = records.iter().find(|r| r.domain == "b.example.com").unwrap();
        assert_eq!(b.account_id.as_deref(), Some("1002"));
        assert_eq!(b.cloud_platform, Some(CloudPlatform::Tencent));
    }

    #[tokio::test]
    async fn refresh_cloud_failure_does_not_abort_others() {
        let store = Arc::new(MockInventoryStore::new());
        let factory = MockSourceFactory::new()
            .with(
                "BAD",
                MockCertificateSource::err(ProviderError::InvalidCredentials {
                    provider: "tencent".to_string(),
                    raw_message: None,
                }),
            )
            .with(
                "GOOD",
                MockCertificateSource::ok(vec![cloud_cert("c1", "a.example.com")]),
            );
        let service = service_with(store.clone(), factory);

        let summary = service
            .refresh_cloud(&[credential("BAD", ""), credential("GOOD", "1")])
            .await
            .unwrap();

        assert_eq!(summary.credentials_failed, 1);
        assert_eq!(summary.certificates_seen, 1);
        assert_eq!(store.records().await.len(), 1);
    }

    #[tokio::test]
    async fn refresh_cloud_without_credentials_does_not_write() {
        let store = Arc::new(MockInventoryStore::new());
        let service = service_with(store.clone(), MockSourceFactory::new());

        let summary = service.refresh_cloud(&[]).await.unwrap();
        assert_eq!(summary, RefreshSummary::default());
        assert_eq!(store.save_count().await, 0);
    }

    #[tokio::test]
    async fn refresh_cloud_preserves_user_fields() {
        let mut kept = CertificateRecord::new("myown-id", "a.example.com");
        kept.enable = true;
        let store = Arc::new(MockInventoryStore::with_records(vec![kept]));
        let factory = MockSourceFactory::new().with(
            "ID1",
            MockCertificateSource::ok(vec![cloud_cert("c1", "a.example.com")]),
        );
        let service = service_with(store.clone(), factory);

        service.refresh_cloud(&[credential("ID1", "1")]).await.unwrap();

        let records = store.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "myown-id");
        assert!(records[0].enable);
        assert_eq!(records[0].cert_id.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn save_failure_is_returned() {
        let store = Arc::new(MockInventoryStore::new());
        store.set_save_error(Some("disk full".to_string())).await;
        let factory = MockSourceFactory::new().with(
            "ID1",
            MockCertificateSource::ok(vec![cloud_cert("c1", "a.example.com")]),
        );
        let service = service_with(store, factory);

        let result = service.refresh_cloud(&[credential("ID1", "1")]).await;
        assert!(matches!(result, Err(CoreError::StorageError(ref m)) if m == "disk full"));
    }

    #[tokio::test]
    async fn concurrent_local_and_cloud_refresh_keep_both() {
        let store = Arc::new(MockInventoryStore::new());
        let factory = MockSourceFactory::new().with(
            "ID1",
            MockCertificateSource::ok(vec![cloud_cert("c1", "cloud.example.com")]),
        );
        let service = Arc::new(service_with(store.clone(), factory));

        let dir = tempfile::tempdir().unwrap();
        let pem = {
            let mut params =
                rcgen::CertificateParams::new(vec!["local.example.com".to_string()]).unwrap();
            params.not_after = rcgen::date_time_ymd(2030, 1, 1);
            let key = rcgen::KeyPair::generate().unwrap();
            params.self_signed(&key).unwrap().pem()
        };
        std::fs::write(dir.path().join("local.example.com.crt"), pem).unwrap();
        std::fs::write(dir.path().join("local.example.com.key"), "key").unwrap();
        let paths = vec![dir.path().to_string_lossy().into_owned()];

        let local = {
            let service = service.clone();
            let paths = paths.clone();
            tokio::spawn(async move { service.refresh_local(&paths, 2).await })
        };
        let cloud = {
            let service = service.clone();
            tokio::spawn(async move { service.refresh_cloud(&[credential("ID1", "1")]).await })
        };
        local.await.unwrap().unwrap();
        cloud.await.unwrap().unwrap();

        let mut domains: Vec<_> = store
            .records()
            .await
            .into_iter()
            .map(|r| r.domain)
            .collect();
        domains.sort();
        assert_eq!(domains, ["cloud.example.com", "local.example.com"]);
    }

    #[tokio::test]
    async fn refresh_local_returns_scanned_map() {
        let store = Arc::new(MockInventoryStore::new());
        let service = service_with(store.clone(), MockSourceFactory::new());
        let dir = tempfile::tempdir().unwrap();

        let scanned = service
            .refresh_local(&[dir.path().to_string_lossy().into_owned()], 2)
            .await
            .unwrap();
        assert!(scanned.is_empty());
        // 空扫描也会写回（集合不变）
        assert_eq!(store.save_count().await, 1);
    }

    #[tokio::test]
    async fn stale_records_are_reported() {
        let mut old = CertificateRecord::new("old00001", "old.example.com");
        old.last_update_time = Some(0);
        let mut fresh = CertificateRecord::new("new00001", "new.example.com");
        fresh.last_update_time = Some(Utc::now().timestamp_millis());
        let store = Arc::new(MockInventoryStore::with_records(vec![old, fresh]));
        let service = service_with(store, MockSourceFactory::new());

        let stale = service.list_stale_records(60_000).await.unwrap();
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].domain, "old.example.com");
    }
}
