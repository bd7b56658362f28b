use std::fs::{self, OpenOptions};
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use revcal_core::config::data_dir;

const LOG_FILE_NAME: &str = "revcal.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs to stderr. Used by the non-interactive commands.
pub fn setup_stderr_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(env_filter()))
        .init();
}

/// Logs to `~/.revcal/revcal.log`, since the TUI owns the terminal.
/// Logging is left off if the file cannot be created.
pub fn setup_file_logging() -> Result<()> {
    let Some(dir) = data_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(file_log.with_filter(env_filter()))
        .init();
    Ok(())
}
