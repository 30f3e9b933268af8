//! Logging setup and relay startup.

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lucid_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use lucid_relay::RelayServer;

/// Get the .lucid directory path.
pub(crate) fn lucid_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".lucid"))
        .unwrap_or_else(|| PathBuf::from(".lucid"))
}

/// Directory for rotated log files.
pub(crate) fn log_dir(logging: &LoggingConfig) -> PathBuf {
    logging
        .dir
        .as_ref()
        .map(|p| PathBuf::from(ConfigLoader::expand_path(&p.to_string_lossy())))
        .unwrap_or_else(|| lucid_dir().join("logs"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.lucid/logs/ (or `[logging].dir`) with daily
/// rotation.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = log_dir(logging);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("lucid")
        .filename_suffix("log")
        .max_log_files(logging.max_files)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The worker flushes on drop; keep it for the life of the process.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // File layer: text, or JSON lines when configured
    let file_text = (!logging.json).then(|| {
        fmt::layer()
            .with_writer(non_blocking.clone())
            .with_ansi(false)
    });
    let file_json = logging.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(file_text)
        .with(file_json)
        .init();

    Ok(())
}

/// Run the relay in foreground.
pub(crate) async fn run_server(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    for warning in ConfigValidator::validate(&config)?.into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    info!("Starting Lucid relay v{}", env!("CARGO_PKG_VERSION"));
    info!(
        provider = config.relay.provider.as_str(),
        model = %config.relay.profile().model,
        "Provider profile selected"
    );

    let server = RelayServer::from_config(&config);
    server.run().await
}
