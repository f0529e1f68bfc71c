//! File-based logging through `tracing`
//!
//! By default the log goes to `trellis.log` next to the executable and is
//! truncated on every start.

use std::fmt;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};
use crate::shared::config::LogConfig;

/// Get the directory where the executable is located
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default log file location
pub fn default_log_path() -> PathBuf {
    exe_dir().join("trellis.log")
}

/// Local wall-clock timestamps with millisecond precision
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

fn filter(config: &LogConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.level)
        .map_err(|e| Error::Logging(format!("bad level '{}': {}", config.level, e)))
}

/// Install the global subscriber described by `config`
///
/// Fails if a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config)?)
        .with_timer(LocalTime)
        .with_ansi(false);

    if config.stderr {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| Error::Logging(e.to_string()))?;
    } else {
        let path = config.file.clone().unwrap_or_else(default_log_path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::Logging(format!("{}: {}", path.display(), e)))?;
        builder
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| Error::Logging(e.to_string()))?;
    }

    tracing::info!("=== Trellis Log Started ===");
    Ok(())
}
