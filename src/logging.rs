//! Tracing subscriber installation.
//!
//! The console owns the terminal while it runs, so log output only goes to a
//! file. Filtering follows `RUST_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::service::LoanServiceError;

const DEFAULT_FILTER: &str = "info";

/// Installs a file-backed subscriber when `log_file` is provided.
///
/// Returns `Ok(false)` when no path was given and nothing was installed.
///
/// # Errors
///
/// Returns [`LoanServiceError::Io`] when the file cannot be opened, or
/// [`LoanServiceError::Configuration`] when a global subscriber is already
/// set.
pub fn init_logging(log_file: Option<&Path>) -> Result<bool, LoanServiceError> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| LoanServiceError::Io {
            message: format!("failed to open log file {}: {error}", path.display()),
        })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| LoanServiceError::Configuration {
            message: format!("failed to install log subscriber: {error}"),
        })?;

    Ok(true)
}
