//! Message types for the TUI update loop.
//!
//! This module defines all message types that can be sent to the application's
//! update function. Messages represent user actions, async command results,
//! and system events.

use crate::service::{
    AadharNumber, ApplicationDetail, LoanApplication, LoanServiceError, LoanStatus,
    SanctionedAmount, ServiceOperation,
};

use super::state::RequestTicket;

/// Messages for the loan review console.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Navigation
    /// Move cursor up one row.
    CursorUp,
    /// Move cursor down one row.
    CursorDown,
    /// Move cursor up one page.
    PageUp,
    /// Move cursor down one page.
    PageDown,
    /// Move cursor to the first row.
    Home,
    /// Move cursor to the last row.
    End,

    // Row actions
    /// Open the approve popup for the selected row.
    ApproveSelected,
    /// Reject the selected row immediately.
    RejectSelected,
    /// Open the revert popup for the selected row.
    RevertSelected,
    /// Open the detail popup for the selected row.
    ViewSelected,

    // Popup input
    /// A printable character typed into the open form.
    InputChar(char),
    /// Delete the last character of the open form.
    InputBackspace,
    /// Submit the open form.
    SubmitPopup,
    /// Close the open popup, discarding its input.
    ClosePopup,

    // Service responses
    /// The applications list arrived.
    ApplicationsLoaded {
        /// Applications in service order.
        applications: Vec<LoanApplication>,
        /// Round-trip time of the request.
        latency_ms: u64,
    },
    /// The applications list could not be loaded.
    ApplicationsLoadFailed(LoanServiceError),
    /// The service accepted a status change.
    StatusUpdated {
        /// Popup that started the request; `None` for rejections.
        ticket: Option<RequestTicket>,
        /// Application that changed.
        aadhar_number: AadharNumber,
        /// New status.
        status: LoanStatus,
        /// Message sent with the change, if any.
        review_message: Option<String>,
    },
    /// The service accepted an approval.
    LoanApproved {
        /// Popup that started the request.
        ticket: RequestTicket,
        /// Application that was approved.
        aadhar_number: AadharNumber,
        /// Amount that was sanctioned.
        amount: SanctionedAmount,
    },
    /// An application's full record arrived.
    DetailLoaded {
        /// Popup that started the request.
        ticket: RequestTicket,
        /// The record.
        detail: ApplicationDetail,
    },
    /// A row action failed.
    ActionFailed {
        /// Popup that started the request; `None` for rejections.
        ticket: Option<RequestTicket>,
        /// Operation that failed.
        operation: ServiceOperation,
        /// Failure detail.
        error: LoanServiceError,
    },

    // Application lifecycle
    /// Dismiss the visible alert.
    DismissAlert,
    /// Toggle help overlay.
    ToggleHelp,
    /// Quit the application.
    Quit,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for cursor movement messages.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::CursorUp
                | Self::CursorDown
                | Self::PageUp
                | Self::PageDown
                | Self::Home
                | Self::End
        )
    }

    /// Returns true for actions that target the selected row.
    #[must_use]
    pub const fn is_row_action(&self) -> bool {
        matches!(
            self,
            Self::ApproveSelected | Self::RejectSelected | Self::RevertSelected | Self::ViewSelected
        )
    }

    /// Returns true for messages that edit or close the open popup.
    #[must_use]
    pub const fn is_popup_input(&self) -> bool {
        matches!(
            self,
            Self::InputChar(_) | Self::InputBackspace | Self::SubmitPopup | Self::ClosePopup
        )
    }

    /// Returns true for results of service calls.
    #[must_use]
    pub const fn is_service_response(&self) -> bool {
        matches!(
            self,
            Self::ApplicationsLoaded { .. }
                | Self::ApplicationsLoadFailed(_)
                | Self::StatusUpdated { .. }
                | Self::LoanApproved { .. }
                | Self::DetailLoaded { .. }
                | Self::ActionFailed { .. }
        )
    }
}
