//! 本地证书扫描
//!
//! 在配置的目录下按深度遍历，找出 `.crt` 证书及其私钥，读取证书到期时间。
//!
//! 域名推断顺序：
//! 1. 文件名去掉 `_bundle.crt` 或 `.crt` 后缀，同目录下需存在 `<domain>.key`；
//! 2. 否则看所在目录名：等于候选域名、等于 `<domain>_nginx`，或去掉 `_nginx`
//!    后本身就是一个域名，则以目录名为域名，私钥取目录中按名称排序的第一个 `.key` 文件。
//!
//! 同一域名下，按文件名匹配到的证书优先于目录名兜底得到的证书。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use x509_parser::pem::parse_x509_pem;

use crate::types::LocalCertificate;

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";
const NGINX_DIR_SUFFIX: &str = "_nginx";

/// 私钥是如何找到的
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum KeyMatch {
    /// 目录名兜底
    Directory,
    /// 同目录下存在 `<domain>.key`
    FileName,
}

/// 扫描目录，返回 `domain -> LocalCertificate`
///
/// `max_depth` 为 1 时只看根目录下的直接子项。不存在的根目录、无法读取的子目录
/// 都只记录警告并跳过。多个文件推断出同一域名时，目录名兜底的结果不会覆盖按文件名
/// 匹配的结果；同类匹配则遍历顺序中靠后的覆盖靠前的。
pub fn scan<P: AsRef<Path>>(roots: &[P], max_depth: usize) -> BTreeMap<String, LocalCertificate> {
    let mut found: BTreeMap<String, (LocalCertificate, KeyMatch)> = BTreeMap::new();

    if roots.is_empty() {
        log::info!("No SSL certificate paths configured, skipping scan");
        return BTreeMap::new();
    }

    for root in roots {
        let root = root.as_ref();
        if !root.is_dir() {
            log::warn!(
                "Path {} does not exist or is not a directory, skipped",
                root.display()
            );
            continue;
        }
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

        let walker = WalkDir::new(&root)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to access {}: {e}", path_of(&e));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let is_crt = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(".crt"));
            if !is_crt {
                continue;
            }

            let Some((cert, matched)) = inspect(entry.path()) else {
                continue;
            };
            if let Some((existing, existing_match)) = found.get(&cert.domain)
                && *existing_match > matched
            {
                log::debug!(
                    "{} matched {} by directory only, keeping {}",
                    entry.path().display(),
                    cert.domain,
                    existing.crt_path.display()
                );
                continue;
            }
            log::info!(
                "Found certificate: {} (expires at {})",
                cert.domain,
                cert.expire_time_at
            );
            found.insert(cert.domain.clone(), (cert, matched));
        }
    }

    found
        .into_iter()
        .map(|(domain, (cert, _))| (domain, cert))
        .collect()
}

fn path_of(e: &walkdir::Error) -> String {
    e.path()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string())
}

/// 推断单个 `.crt` 文件对应的域名和私钥，并读取到期时间
///
/// 任何一步失败都返回 `None`。
pub fn inspect_certificate(crt_path: &Path) -> Option<LocalCertificate> {
    inspect(crt_path).map(|(cert, _)| cert)
}

fn inspect(crt_path: &Path) -> Option<(LocalCertificate, KeyMatch)> {
    let (domain, key_path, matched) = resolve_domain_and_key(crt_path)?;
    let expire_time_at = read_expire_time(crt_path)?;

    Some((
        LocalCertificate {
            domain,
            key_path,
            crt_path: crt_path.to_path_buf(),
            expire_time_at,
        },
        matched,
    ))
}

/// 按文件名、再按目录名推断域名和私钥文件
fn resolve_domain_and_key(crt_path: &Path) -> Option<(String, PathBuf, KeyMatch)> {
    let file_name = crt_path.file_name()?.to_str()?;
    let dir = crt_path.parent()?;

    let candidate = file_name
        .strip_suffix("_bundle.crt")
        .or_else(|| file_name.strip_suffix(".crt"))?;

    if !candidate.is_empty() {
        let key_path = dir.join(format!("{candidate}.key"));
        if key_path.is_file() {
            return Some((candidate.to_string(), key_path, KeyMatch::FileName));
        }
    }

    // 目录名兜底
    let dir_name = dir.file_name()?.to_str()?;
    let stripped = dir_name.strip_suffix(NGINX_DIR_SUFFIX).unwrap_or(dir_name);
    let dir_matches = dir_name == candidate
        || dir_name == format!("{candidate}{NGINX_DIR_SUFFIX}")
        || is_host_name(stripped);
    if !dir_matches || stripped.is_empty() {
        return None;
    }

    let key_path = first_key_file(dir)?;
    Some((stripped.to_string(), key_path, KeyMatch::Directory))
}

/// 目录中按名称排序的第一个 `.key` 文件
fn first_key_file(dir: &Path) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Failed to list {}: {e}", dir.display());
            return None;
        }
    };

    let mut keys: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".key"))
        })
        .collect();
    keys.sort();
    keys.into_iter().next()
}

/// 粗略判断是否为带点的主机名（`example.com`、`*.example.com`）
fn is_host_name(name: &str) -> bool {
    let name = name.strip_prefix("*.").unwrap_or(name);
    name.contains('.')
        && name.split('.').all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}

/// 读取证书文件的到期时间（Unix 毫秒）
///
/// 文件不可读、不是 PEM 或无法解析为 X.509 时返回 `None`。
pub fn read_expire_time(crt_path: &Path) -> Option<i64> {
    let data = match std::fs::read(crt_path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to read {}: {e}", crt_path.display());
            return None;
        }
    };

    let expire = parse_pem_expire_millis(&data);
    if expire.is_none() {
        log::debug!("{} is not a PEM certificate, skipped", crt_path.display());
    }
    expire
}

/// 解析 PEM 中第一张证书的 `notAfter`（Unix 毫秒）
pub fn parse_pem_expire_millis(data: &[u8]) -> Option<i64> {
    let text = std::str::from_utf8(data).ok()?;
    if !text.contains(PEM_BEGIN) || !text.contains(PEM_END) {
        return None;
    }

    let (_, pem) = parse_x509_pem(data).ok()?;
    let cert = pem.parse_x509().ok()?;
    cert.validity().not_after.timestamp().checked_mul(1000)
}
