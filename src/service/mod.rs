//! Typed client for the remote loan service.
//!
//! The service exposes four admin endpoints: list applications, view one
//! application, update an application's status, and approve a loan. This
//! module models their payloads, validates the sanctioned amount typed by the
//! operator, and maps every failure into [`LoanServiceError`] so callers can
//! phrase it for the operator without touching HTTP details.

pub mod amount;
pub mod error;
pub mod gateway;
mod lenient;
pub mod models;

pub use amount::{AmountError, SanctionedAmount};
pub use error::{LoanServiceError, ServiceOperation};
pub use gateway::{HttpLoanGateway, LoanServiceGateway};
pub use models::{
    AadharNumber, ApplicationDetail, ApprovalRequest, LoanApplication, LoanStatus,
    StatusUpdateRequest, SubmittedAt,
};

#[cfg(test)]
pub use gateway::MockLoanServiceGateway;
