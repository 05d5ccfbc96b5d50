//! Loan application review console.
//!
//! The library talks to a loan service over four admin endpoints (list,
//! view, update status, approve), keeps the fetched applications in a
//! client-side store patched by Aadhar number, and drives a terminal
//! console for approving, rejecting, reverting and inspecting applications.

pub mod config;
pub mod logging;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod tui;

pub use config::{LoanAdminConfig, OperationMode};
pub use logging::init_logging;
pub use service::{
    AadharNumber, AmountError, ApplicationDetail, ApprovalRequest, HttpLoanGateway,
    LoanApplication, LoanServiceError, LoanServiceGateway, LoanStatus, SanctionedAmount,
    ServiceOperation, StatusUpdateRequest, SubmittedAt,
};
pub use store::ApplicationStore;
