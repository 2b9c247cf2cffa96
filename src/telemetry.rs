//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! The terminal belongs to the UI, so events go to a log file instead of
//! stdout/stderr.
//!
//! - `GAUNTLET_LOG` controls the filter (e.g. "debug" or
//!   "warn,gauntlet::session=trace").
//! - `GAUNTLET_LOG_FORMAT` selects "text" (default) or "json" lines.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GAUNTLET_LOG";
pub const LOG_FORMAT_ENV: &str = "GAUNTLET_LOG_FORMAT";
pub const DEFAULT_FILTER: &str = "warn,gauntlet=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `log_path`.
///
/// Fails if the file can't be opened; a second call is a no-op.
pub fn init_tracing(log_path: &Path) -> io::Result<()> {
    let file = open_log(log_path)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    // Choose JSON vs text; don't try to store different layer types.
    let installed = match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => builder.json().try_init(),
        _ => builder.try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
