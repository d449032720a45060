//! HTTP endpoints.

use std::collections::BTreeMap;
use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;

use cert_inventory_app::AppState;
use cert_inventory_app::config::AppConfig;
use cert_inventory_core::error::CoreError;
use cert_inventory_core::services::RefreshSummary;
use cert_inventory_core::types::LocalCertificate;

/// Handler error, rendered as HTTP 500 `{status:"error", message}`.
#[derive(Debug)]
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self(e)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(ErrorBody {
            status: "error",
            message: self.0.to_string(),
        })
    }
}

#[derive(Serialize)]
struct LocalRefreshBody {
    status: &'static str,
    message: String,
    certs: BTreeMap<String, LocalCertificate>,
}

#[derive(Serialize)]
struct CloudRefreshBody {
    status: &'static str,
    message: String,
    summary: RefreshSummary,
    config: AppConfig,
}

/// 注册全部路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/getConfigJson", web::get().to(get_config_json))
        .service(
            web::resource("/api/refreshLocalSslCert")
                .route(web::get().to(refresh_local_ssl_cert))
                .route(web::post().to(refresh_local_ssl_cert)),
        )
        .service(
            web::resource("/api/getTencentCerts")
                .route(web::get().to(get_tencent_certs))
                .route(web::post().to(get_tencent_certs)),
        );
}

async fn get_config_json(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.config_snapshot().await)
}

async fn refresh_local_ssl_cert(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let certs = state.refresh_local().await?;
    Ok(HttpResponse::Ok().json(LocalRefreshBody {
        status: "success",
        message: format!("Found {} local certificate(s)", certs.len()),
        certs,
    }))
}

async fn get_tencent_certs(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let summary = state.refresh_cloud().await?;
    let config = state.config_snapshot().await;
    Ok(HttpResponse::Ok().json(CloudRefreshBody {
        status: "success",
        message: format!(
            "Queried {} credential(s), {} failed, {} certificate(s) found",
            summary.credentials_queried, summary.credentials_failed, summary.certificates_seen
        ),
        summary,
        config,
    }))
}
