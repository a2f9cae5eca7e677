//! Logging via `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the TUI, so log lines only ever go to a file:
//! `--log-file <path>` or the `SORTVIZ_LOG` environment variable. Without
//! either no subscriber is installed and the `tracing` macros are no-ops.
//! The filter comes from `RUST_LOG` and defaults to `info`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV_VAR: &str = "SORTVIZ_LOG";
const DEFAULT_FILTER: &str = "info";

/// Resolve the log file from the CLI flag, falling back to the environment.
pub fn log_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_ENV_VAR).map(PathBuf::from))
        .filter(|p| !p.as_os_str().is_empty())
}

/// Install a global subscriber appending to `path`. Returns false when one
/// was already installed.
pub fn init_logging(path: &Path) -> io::Result<bool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok())
}
