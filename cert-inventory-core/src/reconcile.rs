//! 清单合并
//!
//! 把一批观察结果按域名合并进已持久化的记录集合，返回完整的新集合。
//! 已存在的记录只覆盖本次观察提供的字段；`id` 与 `enable` 一旦存在永不重置。

use std::collections::HashMap;

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::types::{CertificateRecord, LocalCertificate, Observation};

/// 新记录 ID 长度
pub const RECORD_ID_LEN: usize = 8;

/// 云端有效期按每月 30 天折算
const DAYS_PER_MONTH: u32 = 30;

/// 生成 8 位 `[0-9A-Za-z]` 随机 ID
pub fn generate_record_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RECORD_ID_LEN)
        .map(char::from)
        .collect()
}

/// 合并观察结果
///
/// - 输入集合中域名重复时保留第一条；
/// - 已有域名只更新观察提供的字段，并把 `last_update_time` 设为 `now_millis`；
/// - 新域名创建记录：随机 ID、`enable = false`；
/// - 输出顺序：原有记录在前（保持原顺序），新域名按观察顺序追加在后。
pub fn reconcile(
    observations: &[Observation],
    persisted: &[CertificateRecord],
    now_millis: i64,
) -> Vec<CertificateRecord> {
    let mut records: Vec<CertificateRecord> = Vec::with_capacity(persisted.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(persisted.len());

    for record in persisted {
        if index.contains_key(&record.domain) {
            log::warn!(
                "Duplicate persisted record for {}, keeping the first one",
                record.domain
            );
            continue;
        }
        index.insert(record.domain.clone(), records.len());
        records.push(record.clone());
    }

    for observation in observations {
        let domain = observation.domain();
        if domain.is_empty() {
            log::debug!("Observation without domain skipped");
            continue;
        }

        let slot = if let Some(&i) = index.get(domain) {
            i
        } else {
            let record = CertificateRecord::new(generate_record_id(), domain);
            log::info!("New certificate record {} for {domain}", record.id);
            index.insert(domain.to_string(), records.len());
            records.push(record);
            records.len() - 1
        };

        let record = &mut records[slot];
        apply_observation(record, observation);
        record.last_update_time = Some(now_millis);
    }

    records
}

/// 把一次观察提供的字段写入记录
fn apply_observation(record: &mut CertificateRecord, observation: &Observation) {
    match observation {
        Observation::Local(local) => apply_local(record, local),
        Observation::Cloud {
            platform,
            account_id,
            certificate,
        } => {
            record.cloud_platform = Some(*platform);
            record.account_id = Some(account_id.clone());
            record.cert_id = Some(certificate.certificate_id.clone());
            // 云端缺失或无法解析的字段保留原值
            overwrite_if_some(&mut record.cert_status, certificate.status.as_ref());
            overwrite_if_some(&mut record.cert_status_name, certificate.status_name.as_ref());
            overwrite_if_some(&mut record.cert_remark, certificate.alias.as_ref());
            overwrite_if_some(&mut record.start_time_at, certificate.begin_time_at.as_ref());
            overwrite_if_some(&mut record.expire_time_at, certificate.end_time_at.as_ref());
            overwrite_if_some(&mut record.create_time_at, certificate.insert_time_at.as_ref());
            let valid_days = certificate
                .validity_period_months
                .map(|months| months.saturating_mul(DAYS_PER_MONTH));
            overwrite_if_some(&mut record.valid_days, valid_days.as_ref());
        }
    }
}

fn overwrite_if_some<T: Clone>(field: &mut Option<T>, value: Option<&T>) {
    if let Some(value) = value {
        *field = Some(value.clone());
    }
}

fn apply_local(record: &mut CertificateRecord, local: &LocalCertificate) {
    record.local_parent_fold_path = local
        .crt_path
        .parent()
        .map(|dir| dir.to_string_lossy().into_owned());
    record.key_filename = local
        .key_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    record.crt_filename = local
        .crt_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    record.expire_time_at = Some(local.expire_time_at);
}

/// 找出过期未更新的记录
///
/// `last_update_time` 缺失，或早于 `now_millis - older_than_millis` 的记录被视为陈旧。
/// 只做报告，不会删除。
pub fn stale_records(
    records: &[CertificateRecord],
    older_than_millis: i64,
    now_millis: i64,
) -> Vec<&CertificateRecord> {
    let threshold = now_millis.saturating_sub(older_than_millis);
    records
        .iter()
        .filter(|r| r.last_update_time.is_none_or(|t| t < threshold))
        .collect()
}
