//! Plain listing mode: print the applications table and exit.

use std::io::{self, Write};

use loan_admin::store::ApplicationStore;
use loan_admin::tui::components::{ApplicationTableComponent, ApplicationTableViewContext};
use loan_admin::{LoanAdminConfig, LoanServiceError, LoanServiceGateway};

/// Loads the list once and prints it to stdout.
///
/// # Errors
///
/// Returns the gateway error when the list cannot be loaded, or
/// [`LoanServiceError::Io`] when stdout cannot be written.
pub async fn run(
    config: &LoanAdminConfig,
    gateway: &dyn LoanServiceGateway,
) -> Result<(), LoanServiceError> {
    let mut stdout = io::stdout().lock();
    write_listing(gateway, &config.timestamp_format, &mut stdout).await
}

/// Loads the list and writes it as an unstyled table.
pub(crate) async fn write_listing(
    gateway: &dyn LoanServiceGateway,
    timestamp_format: &str,
    out: &mut dyn Write,
) -> Result<(), LoanServiceError> {
    let mut store = ApplicationStore::new();
    match gateway.list_applications().await {
        Ok(applications) => store.replace_all(applications),
        Err(error) => {
            tracing::warn!(%error, "failed to load loan applications");
            return Err(error);
        }
    }

    let table = ApplicationTableComponent::view(&ApplicationTableViewContext {
        applications: store.applications(),
        cursor_position: None,
        scroll_offset: 0,
        visible_height: 0,
        timestamp_format,
        styled: false,
    });

    out.write_all(table.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|error| LoanServiceError::Io {
            message: error.to_string(),
        })
}
