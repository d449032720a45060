//! tracing 初始化
//!
//! 控制台始终输出；`enableLogToFile` 打开时另写一份按天滚动的日志文件。
//! 库代码通过 `log` 门面输出，由 `tracing-log` 桥接进来。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cert_inventory_app::config::AppConfig;

const LOG_FILE_PREFIX: &str = "cert-inventory.log";

/// 初始化全局 subscriber
///
/// 返回的 guard 必须持有到进程退出，否则文件日志会丢失尾部。
pub fn init(config: &AppConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = if config.enable_log_to_file {
        std::fs::create_dir_all(&config.log_path)?;
        let appender = tracing_appender::rolling::daily(&config.log_path, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
