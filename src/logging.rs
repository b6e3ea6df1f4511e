//! Tracing setup.
//!
//! Logs go to `~/.structlog/structlog-view.log` so they never draw over the
//! terminal UI. Setting `STRUCTLOG_LOG_STDERR=1` sends them to stderr instead.
//! The filter is read from `RUST_LOG`, defaulting to `structlog_view=info`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::CONFIG_DIR;

pub const LOG_FILE: &str = "structlog-view.log";
pub const ENV_LOG_STDERR: &str = "STRUCTLOG_LOG_STDERR";
const DEFAULT_FILTER: &str = "structlog_view=info";

/// Where log output should be written.
#[derive(Debug, Clone, PartialEq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// No usable location; logs are discarded
    Sink,
}

/// Decide the log target from the stderr switch and home directory.
pub fn resolve_target(stderr_flag: Option<&str>, home: Option<PathBuf>) -> LogTarget {
    let stderr_enabled = matches!(
        stderr_flag.map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES")
    );
    if stderr_enabled {
        return LogTarget::Stderr;
    }
    match home {
        Some(home) => LogTarget::File(home.join(CONFIG_DIR).join(LOG_FILE)),
        None => LogTarget::Sink,
    }
}

fn open_log_file(path: &PathBuf) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let flag = std::env::var(ENV_LOG_STDERR).ok();

    match resolve_target(flag.as_deref(), dirs::home_dir()) {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init();
        }
        LogTarget::File(path) => match open_log_file(&path) {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            Err(_) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(io::sink)
                    .try_init();
            }
        },
        LogTarget::Sink => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}
