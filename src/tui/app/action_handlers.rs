//! Row actions and popup submissions.
//!
//! Reject calls the service straight away. Revert and approve open a form
//! first and call the service when the form is submitted; view opens the
//! detail popup and fetches the record. Popup-initiated requests carry the
//! popup's ticket so their responses can be discarded once it has closed.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::Cmd;

use super::AdminApp;
use crate::service::{
    AadharNumber, ApprovalRequest, LoanStatus, SanctionedAmount, ServiceOperation,
    StatusUpdateRequest,
};
use crate::tui::messages::AppMsg;
use crate::tui::state::{Alert, Popup, RequestTicket};

/// Shown when the sanctioned amount fails validation.
pub(crate) const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid sanctioned amount.";

impl AdminApp {
    /// Dispatches row actions to their handlers.
    pub(super) fn handle_row_action(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if self.popup.is_open() {
            return None;
        }
        let aadhar_number = self.selected_application()?.aadhar_number.clone();

        match msg {
            AppMsg::RejectSelected => Some(self.reject(aadhar_number)),
            AppMsg::RevertSelected => {
                self.popup = Popup::revert(aadhar_number, self.tickets.issue());
                None
            }
            AppMsg::ApproveSelected => {
                self.popup = Popup::approve(aadhar_number, self.tickets.issue());
                None
            }
            AppMsg::ViewSelected => {
                let ticket = self.tickets.issue();
                self.popup = Popup::view(aadhar_number.clone(), ticket);
                Some(self.fetch_detail(aadhar_number, ticket))
            }
            _ => {
                debug_assert!(false, "non-action message routed to handle_row_action");
                None
            }
        }
    }

    /// Dispatches popup editing, submission and closing.
    pub(super) fn handle_popup_input(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::InputChar(character) => {
                if let Some(form) = self.popup.form_mut() {
                    form.push_char(*character);
                }
                None
            }
            AppMsg::InputBackspace => {
                if let Some(form) = self.popup.form_mut() {
                    form.backspace();
                }
                None
            }
            AppMsg::ClosePopup => {
                self.popup.close();
                None
            }
            AppMsg::SubmitPopup => self.submit_popup(),
            _ => {
                debug_assert!(false, "non-input message routed to handle_popup_input");
                None
            }
        }
    }

    fn submit_popup(&mut self) -> Option<Cmd> {
        match &mut self.popup {
            Popup::Revert(form) => {
                if !form.begin_submit() {
                    return None;
                }
                let request =
                    StatusUpdateRequest::revert(form.aadhar_number().clone(), form.input());
                let ticket = form.ticket();
                Some(self.update_status(request, Some(ticket)))
            }
            Popup::Approve(form) => {
                if form.is_submitting() {
                    return None;
                }
                let Ok(amount) = SanctionedAmount::parse(form.input()) else {
                    self.alert = Some(Alert::error(INVALID_AMOUNT_MESSAGE));
                    return None;
                };
                form.begin_submit();
                let aadhar_number = form.aadhar_number().clone();
                let ticket = form.ticket();
                Some(self.approve(aadhar_number, amount, ticket))
            }
            Popup::View(_) | Popup::Closed => None,
        }
    }

    fn reject(&self, aadhar_number: AadharNumber) -> Cmd {
        tracing::debug!(aadhar_number = %aadhar_number, "rejecting application");
        self.update_status(StatusUpdateRequest::reject(aadhar_number), None)
    }

    fn update_status(&self, request: StatusUpdateRequest, ticket: Option<RequestTicket>) -> Cmd {
        let gateway = Arc::clone(&self.gateway);
        Box::pin(async move {
            let msg = match gateway.update_status(&request).await {
                Ok(()) => AppMsg::StatusUpdated {
                    ticket,
                    aadhar_number: request.aadhar_number,
                    status: request.status,
                    // Rejections send an empty message but do not record one.
                    review_message: match request.status {
                        LoanStatus::Rejected => None,
                        _ => request.review_message,
                    },
                },
                Err(error) => AppMsg::ActionFailed {
                    ticket,
                    operation: ServiceOperation::UpdateStatus,
                    error,
                },
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }

    fn approve(
        &self,
        aadhar_number: AadharNumber,
        amount: SanctionedAmount,
        ticket: RequestTicket,
    ) -> Cmd {
        let gateway = Arc::clone(&self.gateway);
        Box::pin(async move {
            let request = ApprovalRequest::new(aadhar_number, amount);
            let msg = match gateway.approve_loan(&request).await {
                Ok(()) => AppMsg::LoanApproved {
                    ticket,
                    aadhar_number: request.aadhar_number,
                    amount,
                },
                Err(error) => AppMsg::ActionFailed {
                    ticket: Some(ticket),
                    operation: ServiceOperation::ApproveLoan,
                    error,
                },
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }

    fn fetch_detail(&self, aadhar_number: AadharNumber, ticket: RequestTicket) -> Cmd {
        let gateway = Arc::clone(&self.gateway);
        Box::pin(async move {
            let msg = match gateway.view_application(&aadhar_number).await {
                Ok(detail) => AppMsg::DetailLoaded { ticket, detail },
                Err(error) => AppMsg::ActionFailed {
                    ticket: Some(ticket),
                    operation: ServiceOperation::ViewApplication,
                    error,
                },
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }
}
