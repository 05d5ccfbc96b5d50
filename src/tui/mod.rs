//! Terminal User Interface for reviewing loan applications.
//!
//! This module provides an interactive console for listing loan applications
//! and approving, rejecting, reverting or inspecting them, built on the
//! bubbletea-rs framework.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::AdminApp`]
//! - **View**: Rendering logic in each component's `view()` method
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`state`]: Cursor, popup and alert state
//! - [`components`]: Table and popup renderers
//! - [`input`]: Key-to-message mapping for input handling
//!
//! # Service Context
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the gateway and display settings are handed over through
//! module-level storage. Call [`set_service_context`] before starting the
//! program; `AdminApp::init()` reads it and issues the one-time list load.

use std::fmt;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::config::DEFAULT_TIMESTAMP_FORMAT;
use crate::service::{
    AadharNumber, ApplicationDetail, ApprovalRequest, LoanApplication, LoanServiceError,
    LoanServiceGateway, StatusUpdateRequest,
};
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod state;

pub use app::AdminApp;

/// Global storage for the service context.
///
/// This is set before the TUI program starts and read by `AdminApp::init()`.
static SERVICE_CONTEXT: OnceLock<ServiceContext> = OnceLock::new();

/// Everything the console needs from outside the update loop.
#[derive(Clone)]
pub struct ServiceContext {
    /// Client used for all four service operations.
    pub gateway: Arc<dyn LoanServiceGateway>,
    /// Receiver of load and decision events.
    pub telemetry: Arc<dyn TelemetrySink>,
    /// strftime layout for the timestamp column.
    pub timestamp_format: String,
}

impl ServiceContext {
    /// Creates a context with no telemetry and the default timestamp layout.
    #[must_use]
    pub fn new(gateway: Arc<dyn LoanServiceGateway>) -> Self {
        Self {
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
        }
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("timestamp_format", &self.timestamp_format)
            .finish_non_exhaustive()
    }
}

/// Sets the service context for the TUI application.
///
/// This must be called before starting the bubbletea-rs program. Without it
/// every request fails with a configuration error.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_service_context(context: ServiceContext) -> bool {
    SERVICE_CONTEXT.set(context).is_ok()
}

/// Returns a clone of the stored service context, if any.
pub(crate) fn get_service_context() -> Option<ServiceContext> {
    SERVICE_CONTEXT.get().cloned()
}

/// Stand-in gateway used when no context was set.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UnconfiguredGateway;

impl UnconfiguredGateway {
    fn error() -> LoanServiceError {
        LoanServiceError::Configuration {
            message: "loan service context not configured".to_owned(),
        }
    }
}

#[async_trait]
impl LoanServiceGateway for UnconfiguredGateway {
    async fn list_applications(&self) -> Result<Vec<LoanApplication>, LoanServiceError> {
        Err(Self::error())
    }

    async fn view_application(
        &self,
        _aadhar_number: &AadharNumber,
    ) -> Result<ApplicationDetail, LoanServiceError> {
        Err(Self::error())
    }

    async fn update_status(&self, _request: &StatusUpdateRequest) -> Result<(), LoanServiceError> {
        Err(Self::error())
    }

    async fn approve_loan(&self, _request: &ApprovalRequest) -> Result<(), LoanServiceError> {
        Err(Self::error())
    }
}
