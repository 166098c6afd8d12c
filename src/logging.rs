use crate::constants::ENV_LOG_DIR;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging, plus a daily-rotated JSON log file when
/// `EVENTS_FEED_LOG_DIR` is set.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn init_logging() -> Option<WorkerGuard> {
    // Respect RUST_LOG if set; otherwise info for our crate, warn for the rest
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,events_feed=info"));

    // stdout carries command output, so logs go to stderr
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let (file_layer, guard) = match std::env::var(ENV_LOG_DIR) {
        Ok(dir) if !dir.trim().is_empty() && prepare_log_dir(&dir) => {
            let file_appender = tracing_appender::rolling::daily(&dir, "events-feed.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        _ => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}

/// Creates `dir` if needed. On failure, notes it on stderr and returns false so
/// the caller runs without the file layer.
fn prepare_log_dir(dir: &str) -> bool {
    match fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("events-feed: file logging disabled, cannot create {}: {}", dir, e);
            false
        }
    }
}
