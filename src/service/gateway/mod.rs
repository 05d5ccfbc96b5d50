//! Gateways for talking to the remote loan service.
//!
//! The trait keeps the TUI independent of HTTP so handlers can be exercised
//! against a mock, while [`HttpLoanGateway`] performs the real requests.

mod error_mapping;
mod http_client;

pub use http_client::HttpLoanGateway;

use async_trait::async_trait;

use crate::service::error::LoanServiceError;
use crate::service::models::{
    AadharNumber, ApplicationDetail, ApprovalRequest, LoanApplication, StatusUpdateRequest,
};

/// Operations offered by the loan service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanServiceGateway: Send + Sync {
    /// Fetch every application, in service order.
    async fn list_applications(&self) -> Result<Vec<LoanApplication>, LoanServiceError>;

    /// Fetch the full record for one application.
    async fn view_application(
        &self,
        aadhar_number: &AadharNumber,
    ) -> Result<ApplicationDetail, LoanServiceError>;

    /// Set an application's status, optionally with a review message.
    async fn update_status(&self, request: &StatusUpdateRequest) -> Result<(), LoanServiceError>;

    /// Approve an application with a sanctioned amount.
    async fn approve_loan(&self, request: &ApprovalRequest) -> Result<(), LoanServiceError>;
}
