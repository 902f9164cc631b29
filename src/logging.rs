//! File-based logging setup.
//!
//! The TUI owns the terminal, so logs go to a daily-rotated file under the
//! platform cache directory instead of stdout. Verbosity comes from
//! `--log-filter`, then `RUST_LOG`, then the built-in default.

use std::io;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "podshelf";
const DEFAULT_FILTER: &str = "podshelf=debug,warn";

/// Where log files land. Falls back to a dotted directory next to the
/// binary when no home directory can be determined.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "podshelf", "podshelf")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(".podshelf-logs"))
}

/// Initialize logging to `podshelf.YYYY-MM-DD.log` with daily rotation.
/// Returns the directory the files are written to.
pub fn init(filter: Option<&str>) -> io::Result<PathBuf> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // The guard flushes on drop; leak it so it lives as long as the process.
    Box::leak(Box::new(guard));

    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(dir)
}
