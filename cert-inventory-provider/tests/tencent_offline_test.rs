#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! 腾讯云 SSL 离线测试
//!
//! Provider 指向本地服务，校验请求头、请求体和响应解析，不需要真实凭证。

mod common;

use cert_inventory_provider::{CertificateSource, ListCertificatesParams, ProviderError};
use common::{CapturedRequest, serve_canned, tencent_at};

fn assert_signed(request: &CapturedRequest, action: &str) {
    assert!(request.request_line.starts_with("POST / "), "{}", request.request_line);
    assert_eq!(request.header("X-TC-Action"), Some(action));
    assert_eq!(request.header("X-TC-Version"), Some("2019-12-05"));
    assert_eq!(
        request.header("Content-Type"),
        Some("application/json; charset=utf-8")
    );

    let timestamp = request.header("X-TC-Timestamp").unwrap();
    assert!(timestamp.parse::<i64>().is_ok(), "{timestamp}");

    let authorization = request.header("Authorization").unwrap();
    assert!(
        authorization.starts_with(
            "TC3-HMAC-SHA256 Credential=AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE/"
        ),
        "{authorization}"
    );
    assert!(authorization.contains("/ssl/tc3_request"), "{authorization}");
    assert!(
        authorization.contains("SignedHeaders=content-type;host,"),
        "{authorization}"
    );
}

fn body_json(request: &CapturedRequest) -> serde_json::Value {
    serde_json::from_str(&request.body).unwrap()
}

#[tokio::test]
async fn list_certificates_sends_signed_request_and_parses_page() {
    let (endpoint, server) = serve_canned(vec![
        r#"{"Response":{"Certificates":[{"CertificateId":"NAEngsSV","Domain":"example.com",
            "Status":1,"StatusName":"已通过","Alias":"prod",
            "CertBeginTime":"2018-09-18 20:00:00","CertEndTime":"2019-09-18 20:00:00",
            "ValidityPeriod":"12"}],"TotalCount":7,"RequestId":"r-1"}}"#
            .to_string(),
    ])
    .await;
    let provider = tencent_at(&endpoint);

    let page = provider
        .list_certificates(&ListCertificatesParams::page(20, 10))
        .await
        .unwrap();

    assert_eq!(page.total_count, 7);
    assert_eq!(page.items.len(), 1);
    let cert = &page.items[0];
    assert_eq!(cert.certificate_id, "NAEngsSV");
    assert_eq!(cert.domain, "example.com");
    assert_eq!(cert.alias.as_deref(), Some("prod"));
    assert_eq!(cert.begin_time_at, Some(1_537_272_000_000));
    assert_eq!(cert.validity_period_months, Some(12));

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_signed(&requests[0], "DescribeCertificates");
    let body = body_json(&requests[0]);
    assert_eq!(body["Offset"], 20);
    assert_eq!(body["Limit"], 10);
}

#[tokio::test]
async fn list_all_pages_through_endpoint() {
    let (endpoint, server) = serve_canned(vec![
        r#"{"Response":{"Certificates":[{"CertificateId":"c1","Domain":"a.example.com"}],
            "TotalCount":2,"RequestId":"r-1"}}"#
            .to_string(),
        r#"{"Response":{"Certificates":[{"CertificateId":"c2","Domain":"b.example.com"}],
            "TotalCount":2,"RequestId":"r-2"}}"#
            .to_string(),
    ])
    .await;
    let provider = tencent_at(&endpoint);

    let all = provider.list_all_certificates().await.unwrap();
    let ids: Vec<_> = all.iter().map(|c| c.certificate_id.as_str()).collect();
    assert_eq!(ids, ["c1", "c2"]);

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(body_json(&requests[0])["Offset"], 0);
    assert_eq!(body_json(&requests[1])["Offset"], 1);
    assert_eq!(body_json(&requests[1])["Limit"], 100);
}

#[tokio::test]
async fn empty_response_body_is_empty_page() {
    let (endpoint, server) = serve_canned(vec![String::new()]).await;
    let provider = tencent_at(&endpoint);

    let page = provider
        .list_certificates(&ListCertificatesParams::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);

    let requests = server.await.unwrap();
    // 空参数不序列化任何字段
    assert_eq!(requests[0].body, "{}");
}

#[tokio::test]
async fn get_download_url_returns_url_and_filename() {
    let (endpoint, server) = serve_canned(vec![
        r#"{"Response":{"DownloadCertificateUrl":"https://download.example.com/cert.zip?sign=x",
            "DownloadFilename":"example.com_nginx.zip","RequestId":"r-3"}}"#
            .to_string(),
    ])
    .await;
    let provider = tencent_at(&endpoint);

    let download = provider.get_download_url("NAEngsSV", "nginx").await.unwrap();
    assert_eq!(download.url, "https://download.example.com/cert.zip?sign=x");
    assert_eq!(download.filename, "example.com_nginx.zip");

    let requests = server.await.unwrap();
    assert_signed(&requests[0], "DescribeDownloadCertificateUrl");
    let body = body_json(&requests[0]);
    assert_eq!(body["CertificateId"], "NAEngsSV");
    assert_eq!(body["ServiceType"], "nginx");
}

#[tokio::test]
async fn get_download_url_without_url_is_parse_error() {
    let (endpoint, server) = serve_canned(vec![
        r#"{"Response":{"DownloadFilename":"example.com_nginx.zip","RequestId":"r-4"}}"#
            .to_string(),
        r#"{"Response":{"DownloadCertificateUrl":"","RequestId":"r-5"}}"#.to_string(),
    ])
    .await;
    let provider = tencent_at(&endpoint);

    for _ in 0..2 {
        let result = provider.get_download_url("NAEngsSV", "nginx").await;
        assert!(
            matches!(result, Err(ProviderError::ParseError { .. })),
            "{result:?}"
        );
    }
    assert_eq!(server.await.unwrap().len(), 2);
}

#[tokio::test]
async fn auth_failure_envelope_is_invalid_credentials() {
    let (endpoint, server) = serve_canned(vec![
        r#"{"Response":{"Error":{"Code":"AuthFailure.SignatureFailure",
            "Message":"The provided credentials could not be validated."},"RequestId":"r-6"}}"#
            .to_string(),
    ])
    .await;
    let provider = tencent_at(&endpoint);

    let result = provider
        .list_certificates(&ListCertificatesParams::default())
        .await;
    match result {
        Err(ProviderError::InvalidCredentials { raw_message, .. }) => assert_eq!(
            raw_message.as_deref(),
            Some("The provided credentials could not be validated.")
        ),
        other => panic!("unexpected: {other:?}"),
    }
    server.await.unwrap();
}
