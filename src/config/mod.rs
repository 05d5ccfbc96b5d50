//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.loan-admin.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `LOAN_ADMIN_BASE_URL` and friends
//! 4. **Command-line arguments** – `--base-url`/`-b` and friends
//!
//! # Configuration File
//!
//! ```toml
//! base_url = "https://loans.internal.example"
//! request_timeout_seconds = 30
//! timestamp_format = "%d/%m/%Y, %H:%M:%S"
//! log_file = "/tmp/loan-admin.log"
//! ```

use std::path::Path;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::service::LoanServiceError;

/// Service root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Local timestamp layout used when nothing else is configured.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Full-screen review console.
    AdminTui,
    /// Print the applications table once and exit.
    PlainListing,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `LOAN_ADMIN_BASE_URL` or `--base-url`: Loan service root URL
/// - `LOAN_ADMIN_REQUEST_TIMEOUT_SECONDS` or `--request-timeout-seconds`
/// - `LOAN_ADMIN_TIMESTAMP_FORMAT` or `--timestamp-format`
/// - `LOAN_ADMIN_LOG_FILE` or `--log-file`
///
/// # Example
///
/// ```no_run
/// use loan_admin::LoanAdminConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = LoanAdminConfig::load().expect("failed to load configuration");
/// let url = config.service_url().expect("base URL must be valid");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "LOAN_ADMIN",
    discovery(
        dotfile_name = ".loan-admin.toml",
        config_file_name = "loan-admin.toml",
        app_name = "loan-admin"
    )
)]
pub struct LoanAdminConfig {
    /// Root URL of the loan service.
    ///
    /// Can be provided via:
    /// - CLI: `--base-url <URL>` or `-b <URL>`
    /// - Environment: `LOAN_ADMIN_BASE_URL`
    /// - Config file: `base_url = "..."`
    #[ortho_config(cli_short = 'b')]
    pub base_url: String,

    /// Optional HTTP timeout in seconds. Unset or `0` means requests wait
    /// indefinitely.
    ///
    /// Can be provided via:
    /// - CLI: `--request-timeout-seconds <SECS>`
    /// - Environment: `LOAN_ADMIN_REQUEST_TIMEOUT_SECONDS`
    /// - Config file: `request_timeout_seconds = 30`
    #[ortho_config()]
    pub request_timeout_seconds: Option<u64>,

    /// `chrono` strftime layout for submission timestamps, rendered in the
    /// local time zone.
    #[ortho_config()]
    pub timestamp_format: String,

    /// File that receives tracing output. Without it no log subscriber is
    /// installed, keeping the terminal clean.
    ///
    /// Can be provided via:
    /// - CLI: `--log-file <PATH>` or `-l <PATH>`
    /// - Environment: `LOAN_ADMIN_LOG_FILE`
    /// - Config file: `log_file = "..."`
    #[ortho_config(cli_short = 'l')]
    pub log_file: Option<String>,

    /// Prints the applications table once instead of starting the console.
    ///
    /// Can be provided via:
    /// - CLI: `--plain` / `-p`
    /// - Config file: `plain = true`
    #[ortho_config(cli_short = 'p')]
    pub plain: bool,
}

impl Default for LoanAdminConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout_seconds: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
            log_file: None,
            plain: false,
        }
    }
}

impl LoanAdminConfig {
    /// Parses and checks the service root URL.
    ///
    /// # Errors
    ///
    /// Returns [`LoanServiceError::InvalidUrl`] when the value does not parse,
    /// or [`LoanServiceError::Configuration`] when it is not an absolute
    /// `http`/`https` URL.
    pub fn service_url(&self) -> Result<Url, LoanServiceError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|error| LoanServiceError::InvalidUrl(format!("{}: {error}", self.base_url)))?;

        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(url),
            scheme => Err(LoanServiceError::Configuration {
                message: format!(
                    "base URL must be an absolute http(s) URL (got scheme `{scheme}` in {})",
                    self.base_url
                ),
            }),
        }
    }

    /// Returns the HTTP timeout, treating `0` as "no timeout".
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }

    /// Returns the log file path, if any.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(Path::new)
    }

    /// Determines the operation mode.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.plain {
            OperationMode::PlainListing
        } else {
            OperationMode::AdminTui
        }
    }

    /// Checks the configuration for values that would fail later.
    ///
    /// # Errors
    ///
    /// Returns the first problem found in the base URL or timestamp format.
    pub fn validate(&self) -> Result<(), LoanServiceError> {
        self.service_url()?;
        validate_timestamp_format(&self.timestamp_format)
    }
}

/// Rejects strftime layouts containing specifiers `chrono` cannot render.
///
/// # Errors
///
/// Returns [`LoanServiceError::Configuration`] for empty or invalid layouts.
pub fn validate_timestamp_format(format: &str) -> Result<(), LoanServiceError> {
    if format.is_empty() {
        return Err(LoanServiceError::Configuration {
            message: "timestamp format must not be empty".to_owned(),
        });
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LoanServiceError::Configuration {
            message: format!("timestamp format `{format}` contains an invalid specifier"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests;
