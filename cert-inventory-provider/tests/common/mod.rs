//! 共享测试工具和辅助函数

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::env;
use std::sync::Arc;

use cert_inventory_provider::{ApiCredential, CertificateSource, CloudPlatform, create_source};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试上下文
pub struct TestContext {
    pub source: Arc<dyn CertificateSource>,
}

impl TestContext {
    /// 从 `TENCENT_SECRET_ID` / `TENCENT_SECRET_KEY` 创建腾讯云上下文
    pub fn tencent() -> Option<Self> {
        let secret_id = env::var("TENCENT_SECRET_ID").ok()?;
        let secret_key = env::var("TENCENT_SECRET_KEY").ok()?;
        let account_id = env::var("TENCENT_ACCOUNT_ID").unwrap_or_default();

        let credential =
            ApiCredential::new(CloudPlatform::Tencent, secret_id, secret_key, account_id);
        Some(Self {
            source: create_source(&credential),
        })
    }

    /// 使用一组必然无效的凭证
    pub fn tencent_with_bogus_credentials() -> Self {
        let credential = ApiCredential::new(
            CloudPlatform::Tencent,
            "AKIDinvalidinvalidinvalidinvalid",
            "invalid",
            "",
        );
        Self {
            source: create_source(&credential),
        }
    }
}

/// 收到的一次 HTTP 请求
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// 请求行，如 `POST / HTTP/1.1`
    pub request_line: String,
    /// 小写 header 名 -> 值
    pub headers: std::collections::HashMap<String, String>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// 本地 HTTP 服务：按顺序对每个连接返回一条预设 JSON 响应
///
/// 返回 `http://127.0.0.1:<port>` 和一个在所有响应发完后给出已收到请求的句柄。
pub async fn serve_canned(
    responses: Vec<String>,
) -> (String, tokio::task::JoinHandle<Vec<CapturedRequest>>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut captured = Vec::new();
        for body in responses {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut buf = Vec::new();
            let mut chunk = [0_u8; 4096];
            let header_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers were complete");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
            let mut lines = head.split("\r\n");
            let request_line = lines.next().unwrap_or_default().to_string();
            let headers: std::collections::HashMap<String, String> = lines
                .filter_map(|line| line.split_once(':'))
                .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
                .collect();

            let content_length: usize = headers
                .get("content-length")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before body was complete");
                buf.extend_from_slice(&chunk[..n]);
            }
            let request_body =
                String::from_utf8_lossy(&buf[header_end..header_end + content_length]).into_owned();

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();

            captured.push(CapturedRequest {
                request_line,
                headers,
                body: request_body,
            });
        }
        captured
    });

    (format!("http://{addr}"), handle)
}

/// 指向本地服务的腾讯云 Provider
pub fn tencent_at(endpoint: &str) -> cert_inventory_provider::TencentSslProvider {
    let credential = ApiCredential::new(
        CloudPlatform::Tencent,
        "AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE",
        "Gu5t9xGARNpq86cd98joQYCN3EXAMPLE",
        "100000000001",
    );
    cert_inventory_provider::TencentSslProvider::builder(credential)
        .endpoint(endpoint)
        .build()
}
