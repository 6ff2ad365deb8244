use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "nasa-explorer.log";
pub const LOG_ENV_VAR: &str = "NASA_EXPLORER_LOG";
const DEFAULT_DIRECTIVE: &str = "nasa_explorer=info";

/// Install the global tracing subscriber.
///
/// Output goes to `<log_dir>/nasa-explorer.log` rather than the terminal,
/// which is owned by the alternate screen while the TUI runs.
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = open_log_file(&log_path)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(fmt_layer)
        .try_init()
        .context("Failed to set global default tracing subscriber")?;

    Ok(log_path)
}

/// Open the log file for appending, creating parent directories as needed
pub fn open_log_file(log_path: &Path) -> Result<File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))
}

fn env_filter() -> Result<EnvFilter> {
    EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(DEFAULT_DIRECTIVE.parse()?)
        .from_env()
        .context("Failed to parse logging directives")
}
