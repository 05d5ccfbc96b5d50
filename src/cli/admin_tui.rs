//! TUI mode for reviewing loan applications.
//!
//! This module provides the entry point for the interactive console. The
//! list itself is loaded by the console once it starts.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;

use loan_admin::telemetry::TracingTelemetrySink;
use loan_admin::tui::{AdminApp, ServiceContext, set_service_context};
use loan_admin::{HttpLoanGateway, LoanAdminConfig, LoanServiceError};

/// Runs the review console against `gateway`.
///
/// # Errors
///
/// Returns [`LoanServiceError::Io`] if the terminal program fails to start
/// or exits with an error.
pub async fn run(
    config: &LoanAdminConfig,
    gateway: HttpLoanGateway,
) -> Result<(), LoanServiceError> {
    tracing::info!(base_url = %gateway.base_url(), "starting review console");

    // Model::init() reads the context; a second call in the same process
    // keeps the first context.
    let _ = set_service_context(ServiceContext {
        gateway: Arc::new(gateway),
        telemetry: Arc::new(TracingTelemetrySink),
        timestamp_format: config.timestamp_format.clone(),
    });

    run_tui().await.map_err(|error| LoanServiceError::Io {
        message: format!("TUI error: {error}"),
    })
}

/// Runs the bubbletea-rs program with the `AdminApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    let program = Program::<AdminApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
