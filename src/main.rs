//! loan-admin CLI entrypoint.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use loan_admin::{HttpLoanGateway, LoanAdminConfig, LoanServiceError, OperationMode, init_logging};
use ortho_config::OrthoConfig;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), LoanServiceError> {
    let config = load_config()?;
    config.validate()?;
    init_logging(config.log_path())?;

    let gateway = HttpLoanGateway::from_config(&config)?;
    match config.operation_mode() {
        OperationMode::AdminTui => cli::admin_tui::run(&config, gateway).await,
        OperationMode::PlainListing => cli::plain_listing::run(&config, &gateway).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`LoanServiceError::Configuration`] when ortho-config fails to
/// parse arguments or load configuration files.
fn load_config() -> Result<LoanAdminConfig, LoanServiceError> {
    LoanAdminConfig::load().map_err(|error| LoanServiceError::Configuration {
        message: error.to_string(),
    })
}
