//! Error types exposed by the loan service layer.

use std::fmt;

use thiserror::Error;

/// The remote operation a request belonged to.
///
/// Carried by errors so that callers can phrase failures for the operator
/// without inspecting transport details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOperation {
    /// `GET /admin/loan-applications`.
    ListApplications,
    /// `GET /admin/view-application/{aadharNumber}`.
    ViewApplication,
    /// `POST /admin/update-loan-status`.
    UpdateStatus,
    /// `POST /admin/approve-loan`.
    ApproveLoan,
}

impl ServiceOperation {
    /// Short description used in log lines and error messages.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ListApplications => "list loan applications",
            Self::ViewApplication => "view loan application",
            Self::UpdateStatus => "update loan status",
            Self::ApproveLoan => "approve loan",
        }
    }

    /// Operator-facing message for a failed request.
    ///
    /// Non-200 responses and transport failures are worded differently so the
    /// operator can tell a refusal from an unreachable service.
    #[must_use]
    pub const fn user_message(self, error: &LoanServiceError) -> &'static str {
        let refused = error.is_status_failure();
        match (self, refused) {
            (Self::ListApplications, true) => "Failed to fetch loan applications.",
            (Self::ListApplications, false) => {
                "An error occurred while fetching loan applications."
            }
            (Self::ViewApplication, true) => "Failed to fetch application details.",
            (Self::ViewApplication, false) => {
                "An error occurred while fetching application details."
            }
            (Self::UpdateStatus, true) => "Failed to update loan status.",
            (Self::UpdateStatus, false) => "An error occurred while updating the loan status.",
            (Self::ApproveLoan, true) => "Failed to approve the loan.",
            (Self::ApproveLoan, false) => "An error occurred while approving the loan.",
        }
    }
}

impl fmt::Display for ServiceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Errors surfaced while configuring or talking to the loan service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoanServiceError {
    /// The service answered with anything other than `200 OK`.
    #[error("{operation} failed with status {status}: {message}")]
    Status {
        /// Operation that was refused.
        operation: ServiceOperation,
        /// HTTP status code returned by the service.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("network error during {operation}: {message}")]
    Network {
        /// Operation that was in flight.
        operation: ServiceOperation,
        /// Transport-level error detail.
        message: String,
    },

    /// The response body did not match the expected envelope.
    #[error("unexpected response to {operation}: {message}")]
    Decode {
        /// Operation whose response could not be decoded.
        operation: ServiceOperation,
        /// Decoder error detail.
        message: String,
    },

    /// The configured service URL is unusable.
    #[error("loan service URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O failed (log file, terminal output).
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl LoanServiceError {
    /// Returns true when the service responded but refused the request.
    #[must_use]
    pub const fn is_status_failure(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}
