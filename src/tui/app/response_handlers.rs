//! Reconciling service responses with the store and the popup.
//!
//! Confirmed changes patch the store in place; the list is never fetched
//! again. Responses tied to a popup ticket apply only while that popup is
//! still open.

use bubbletea_rs::Cmd;

use super::AdminApp;
use crate::service::{
    AadharNumber, ApplicationDetail, LoanApplication, LoanServiceError, LoanStatus,
    SanctionedAmount, ServiceOperation,
};
use crate::telemetry::TelemetryEvent;
use crate::tui::messages::AppMsg;
use crate::tui::state::{Alert, Popup, RequestTicket};

/// Shown after the service confirms an approval.
pub(crate) const APPROVED_MESSAGE: &str = "Loan approved successfully!";

/// Success text for a confirmed status change.
pub(crate) fn status_updated_message(status: LoanStatus) -> String {
    format!("Loan status updated to {status} successfully!")
}

impl AdminApp {
    /// Dispatches service responses to their handlers.
    pub(super) fn handle_service_response(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ApplicationsLoaded {
                applications,
                latency_ms,
            } => self.handle_applications_loaded(applications, *latency_ms),
            AppMsg::ApplicationsLoadFailed(error) => self.handle_load_failed(error),
            AppMsg::StatusUpdated {
                ticket,
                aadhar_number,
                status,
                review_message,
            } => self.handle_status_updated(
                *ticket,
                aadhar_number,
                *status,
                review_message.as_deref(),
            ),
            AppMsg::LoanApproved {
                ticket,
                aadhar_number,
                amount,
            } => self.handle_loan_approved(*ticket, aadhar_number, *amount),
            AppMsg::DetailLoaded { ticket, detail } => self.handle_detail_loaded(*ticket, detail),
            AppMsg::ActionFailed {
                ticket,
                operation,
                error,
            } => self.handle_action_failed(*ticket, *operation, error),
            _ => {
                debug_assert!(
                    false,
                    "non-response message routed to handle_service_response"
                );
                None
            }
        }
    }

    fn handle_applications_loaded(
        &mut self,
        applications: &[LoanApplication],
        latency_ms: u64,
    ) -> Option<Cmd> {
        self.store.replace_all(applications.to_vec());
        self.cursor.clamp_cursor(self.store.len());
        self.cursor.ensure_visible(self.table.visible_height());

        tracing::info!(count = applications.len(), latency_ms, "loaded loan applications");
        self.telemetry.record(TelemetryEvent::ApplicationsLoaded {
            count: applications.len(),
            latency_ms,
        });
        None
    }

    fn handle_load_failed(&mut self, error: &LoanServiceError) -> Option<Cmd> {
        tracing::warn!(%error, "failed to load loan applications");
        self.store
            .fail_load(ServiceOperation::ListApplications.user_message(error));
        self.cursor.clamp_cursor(0);
        self.telemetry.record(TelemetryEvent::ApplicationsLoadFailed);
        None
    }

    fn handle_status_updated(
        &mut self,
        ticket: Option<RequestTicket>,
        aadhar_number: &AadharNumber,
        status: LoanStatus,
        review_message: Option<&str>,
    ) -> Option<Cmd> {
        if let Some(issued) = ticket {
            if !self.accepts(issued) {
                return None;
            }
            self.popup.close();
        }

        self.store.apply_status(aadhar_number, status, review_message);
        tracing::info!(aadhar_number = %aadhar_number, %status, "loan status updated");
        self.telemetry.record(TelemetryEvent::decision(status));
        self.alert = Some(Alert::success(status_updated_message(status)));
        None
    }

    fn handle_loan_approved(
        &mut self,
        ticket: RequestTicket,
        aadhar_number: &AadharNumber,
        amount: SanctionedAmount,
    ) -> Option<Cmd> {
        if !self.accepts(ticket) {
            return None;
        }
        self.popup.close();

        self.store.apply_approval(aadhar_number, amount);
        tracing::info!(
            aadhar_number = %aadhar_number,
            sanctioned_amount = amount.value(),
            "loan approved"
        );
        self.telemetry
            .record(TelemetryEvent::decision(LoanStatus::Approved));
        self.alert = Some(Alert::success(APPROVED_MESSAGE));
        None
    }

    fn handle_detail_loaded(
        &mut self,
        ticket: RequestTicket,
        detail: &ApplicationDetail,
    ) -> Option<Cmd> {
        if !self.accepts(ticket) {
            return None;
        }
        if let Popup::View(view) = &mut self.popup {
            view.set_detail(detail.clone());
        }
        None
    }

    fn handle_action_failed(
        &mut self,
        ticket: Option<RequestTicket>,
        operation: ServiceOperation,
        error: &LoanServiceError,
    ) -> Option<Cmd> {
        if let Some(issued) = ticket {
            if !self.accepts(issued) {
                return None;
            }
            // Forms stay open for another attempt; the detail popup has
            // nothing to show.
            if let Some(form) = self.popup.form_mut() {
                form.end_submit();
            } else {
                self.popup.close();
            }
        }

        tracing::warn!(%operation, %error, "loan service request failed");
        self.alert = Some(Alert::error(operation.user_message(error)));
        None
    }

    /// Returns true if a response for `ticket` may still be applied.
    fn accepts(&self, ticket: RequestTicket) -> bool {
        let accepted = self.popup.accepts(ticket);
        if !accepted {
            tracing::debug!(
                ticket = ticket.value(),
                "discarding response for a popup that is no longer open"
            );
        }
        accepted
    }
}
