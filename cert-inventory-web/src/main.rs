//! SSL certificate inventory server.
//!
//! Loads the JSON config document and the credential file, then serves the
//! inventory endpoints over HTTP. A port of `0` runs without the server.

mod cli;
mod logging;
mod routes;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use clap::Parser;

use cert_inventory_app::AppStateBuilder;
use cert_inventory_app::adapters::JsonConfigStore;
use cert_inventory_app::config::AppConfig;
use cert_inventory_core::credentials::load_credentials_file;

use cli::Args;

const TICK_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config);
    args.apply(&mut config);

    // 配置先于日志加载，加载结果在这里补记
    let _log_guard = logging::init(&config).context("Failed to initialize logging")?;
    tracing::info!(
        "Starting certificate inventory (config: {})",
        config.config_path.display()
    );
    if let Some(ref e) = config.load_error {
        tracing::warn!(
            "Config file {} could not be loaded, running on defaults; the inventory will not be saved: {e}",
            config.config_path.display()
        );
    } else if !config.config_path.exists() {
        tracing::info!("Config file not found, using defaults");
    }

    let credentials = load_credentials_file(&config.key_text_file);
    tracing::info!("Loaded {} API credential(s)", credentials.len());

    let port = config.port;
    let state = AppStateBuilder::new()
        .store(Arc::new(JsonConfigStore::new(config)))
        .credentials(credentials)
        .build()?;
    let state = web::Data::new(state);

    let ticker = tokio::spawn(background_tick());

    if port == 0 {
        tracing::info!("HTTP server disabled (port 0)");
        wait_for_shutdown().await;
    } else {
        let server = HttpServer::new({
            let state = state.clone();
            move || App::new().app_data(state.clone()).configure(routes::configure)
        })
        .bind(("0.0.0.0", port));

        match server {
            Ok(server) => {
                tracing::info!("Listening on 0.0.0.0:{port}");
                server.run().await.context("HTTP server error")?;
            }
            Err(e) => {
                tracing::warn!("Failed to bind port {port}, running without HTTP server: {e}");
                wait_for_shutdown().await;
            }
        }
    }

    ticker.abort();
    tracing::info!("Shutting down");
    Ok(())
}

/// 定时任务占位：只打调试日志
async fn background_tick() {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    loop {
        interval.tick().await;
        tracing::debug!("Background tick");
    }
}

async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }
}
