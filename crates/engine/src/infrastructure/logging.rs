//! Tracing subscriber setup.
//!
//! Console output honours `RUST_LOG` (default [`DEFAULT_FILTER`]). An optional
//! debug log file receives everything at debug level and above, uncoloured.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_FILTER: &str = "invasion_engine=info,invasion=info";
const DEBUG_FILE_FILTER: &str = "invasion_engine=debug,invasion=debug";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open debug log {path}: {source}")]
    DebugLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber. Call once, before the simulation starts.
pub fn init_logging(debug_log: Option<&Path>) -> Result<(), LoggingError> {
    let console = tracing_subscriber::fmt::layer().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
    );

    let debug_file = match debug_log {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(open_debug_log(path)?))
                .with_filter(EnvFilter::new(DEBUG_FILE_FILTER)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(debug_file)
        .try_init()?;
    Ok(())
}

/// Create (or truncate) the debug log, creating missing parent folders.
fn open_debug_log(path: &Path) -> Result<File, LoggingError> {
    let to_error = |source| LoggingError::DebugLog {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    File::create(path).map_err(to_error)
}
