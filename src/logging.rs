use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DAYS_TO_KEEP: usize = 7;

/// Installs the global subscriber: `RUST_LOG` filtering (default `info`),
/// stderr output, and a daily log file under `log_dir` when one is given.
///
/// The returned guard flushes the file writer and must live until exit.
pub fn init(
    log_dir: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(std::io::stderr);

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .try_init()?;
        return Ok(None);
    };

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("quickdns")
        .filename_suffix("log")
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(Some(guard))
}
