//! `CertificateSource` implementation for Tencent Cloud SSL

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{CertificateSource, ErrorContext, ProviderErrorMapper};
use crate::types::{
    CertificatePage, CloudCertificate, CloudPlatform, DownloadUrl, ListCertificatesParams,
    SortOrder,
};
use crate::utils::datetime::parse_platform_time_millis;

use super::TencentSslProvider;
use super::types::{
    DescribeCertificatesRequest, DescribeCertificatesResponse,
    DescribeDownloadCertificateUrlRequest, DescribeDownloadCertificateUrlResponse,
    TencentCertificate,
};

impl TencentSslProvider {
    /// 将平台证书转换为统一结构
    ///
    /// 时间字段各自独立解析，单个字段格式错误只影响该字段。
    pub(crate) fn convert_certificate(cert: TencentCertificate) -> CloudCertificate {
        let parse_time = |field: &str, value: Option<&str>| {
            let value = value?;
            let parsed = parse_platform_time_millis(value);
            if parsed.is_none() && !value.trim().is_empty() {
                log::warn!(
                    "[tencent] Certificate {}: unparsable {field} '{value}'",
                    cert.certificate_id
                );
            }
            parsed
        };

        let begin_time_at = parse_time("CertBeginTime", cert.cert_begin_time.as_deref());
        let insert_time_at = parse_time("InsertTime", cert.insert_time.as_deref());
        let end_time_at = parse_time("CertEndTime", cert.cert_end_time.as_deref());

        CloudCertificate {
            certificate_id: cert.certificate_id,
            domain: cert.domain.unwrap_or_default(),
            status: cert.status,
            status_name: cert.status_name,
            status_msg: cert.status_msg,
            alias: cert.alias,
            begin_time_at,
            insert_time_at,
            end_time_at,
            validity_period_months: cert.validity_period,
            is_ignore: cert.is_ignore.unwrap_or(false),
            from: cert.from,
            owner_uin: cert.owner_uin,
            verify_type: cert.verify_type,
        }
    }
}

fn sort_order_param(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

#[async_trait]
impl CertificateSource for TencentSslProvider {
    fn platform(&self) -> CloudPlatform {
        CloudPlatform::Tencent
    }

    async fn list_certificates(&self, params: &ListCertificatesParams) -> Result<CertificatePage> {
        let req = DescribeCertificatesRequest {
            offset: params.offset,
            limit: params.limit,
            search_key: params.search_key.clone(),
            certificate_status: params.status_filter.clone(),
            cert_ids: params.cert_ids.clone(),
            expiration_sort: params.sort_order.map(|o| sort_order_param(o).to_string()),
        };

        let response: Option<DescribeCertificatesResponse> = self
            .request("DescribeCertificates", &req, ErrorContext::default())
            .await?;

        let Some(response) = response else {
            return Ok(CertificatePage::default());
        };

        let items: Vec<CloudCertificate> = response
            .certificates
            .unwrap_or_default()
            .into_iter()
            .map(Self::convert_certificate)
            .collect();
        let total_count = response
            .total_count
            .unwrap_or_else(|| u32::try_from(items.len()).unwrap_or(u32::MAX));

        log::debug!(
            "[{}] DescribeCertificates returned {} of {total_count}",
            self.provider_name(),
            items.len()
        );

        Ok(CertificatePage { items, total_count })
    }

    async fn get_download_url(
        &self,
        certificate_id: &str,
        service_type: &str,
    ) -> Result<DownloadUrl> {
        let req = DescribeDownloadCertificateUrlRequest {
            certificate_id,
            service_type,
        };
        let ctx = ErrorContext {
            certificate_id: Some(certificate_id.to_string()),
        };

        let response: Option<DescribeDownloadCertificateUrlResponse> = self
            .request("DescribeDownloadCertificateUrl", &req, ctx)
            .await?;

        let response = response.ok_or_else(|| self.parse_error("Empty response body"))?;
        let url = response
            .download_certificate_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| self.parse_error("Missing DownloadCertificateUrl in response"))?;

        Ok(DownloadUrl {
            url,
            filename: response.download_filename.unwrap_or_default(),
        })
    }
}
