use std::env;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn level_from_env(var: &str, default: &str) -> EnvFilter {
    let directive = env::var(var).unwrap_or_else(|_| default.to_string());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Console and file logging with separate levels.
///
/// The console shares the terminal with the operator prompts and the copy
/// progress bar, so `STDOUT_LOG_LEVEL` defaults to `warn`. The file gets
/// `TRACING_LEVEL`, default `info`.
pub fn init_logger() -> impl Drop {
    let stdout_filter = level_from_env("STDOUT_LOG_LEVEL", "warn");
    let file_filter = level_from_env("TRACING_LEVEL", "info");

    let log_file_path =
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| "./logs/disc-intake.log".to_string());

    let file_appender = tracing_appender::rolling::never("./", log_file_path);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .without_time()
                .with_ansi(true)
                .with_filter(stdout_filter),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .init();

    debug!("Tracing is configured for stdout and file logging.");

    guard
}
