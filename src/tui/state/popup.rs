//! Popup state machine for the review console.
//!
//! The active popup is a single enum value, so at most one popup is open at a
//! time. Each popup is issued a [`RequestTicket`] when it opens; responses
//! to requests it started carry that ticket back, and a response is only
//! applied while the popup that issued it is still the one on screen.

use crate::service::{AadharNumber, ApplicationDetail};

/// Identifies the popup instance a request was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Numeric value, for logging.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Issues strictly increasing tickets.
#[derive(Debug, Default)]
pub struct TicketIssuer {
    issued: u64,
}

impl TicketIssuer {
    /// Returns a ticket never handed out before by this issuer.
    pub const fn issue(&mut self) -> RequestTicket {
        self.issued = self.issued.wrapping_add(1);
        RequestTicket(self.issued)
    }
}

/// Which popup is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    /// Review message entry for a revert.
    Revert,
    /// Sanctioned amount entry for an approval.
    Approve,
    /// Read-only application details.
    View,
}

/// Text entry bound to one application.
///
/// Only multi-line forms accept `'\n'`; single-line forms drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextForm {
    aadhar_number: AadharNumber,
    input: String,
    ticket: RequestTicket,
    multiline: bool,
    submitting: bool,
}

impl TextForm {
    fn new(aadhar_number: AadharNumber, ticket: RequestTicket, multiline: bool) -> Self {
        Self {
            aadhar_number,
            input: String::new(),
            ticket,
            multiline,
            submitting: false,
        }
    }

    /// Application the form acts on.
    #[must_use]
    pub const fn aadhar_number(&self) -> &AadharNumber {
        &self.aadhar_number
    }

    /// Text typed so far.
    #[must_use]
    pub const fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Ticket tying responses to this form.
    #[must_use]
    pub const fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    /// Returns true when the form accepts line breaks.
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Returns true while the submitted request is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Appends a character unless a submission is in flight.
    pub fn push_char(&mut self, character: char) {
        if self.submitting || (character == '\n' && !self.multiline) {
            return;
        }
        self.input.push(character);
    }

    /// Removes the last character unless a submission is in flight.
    pub fn backspace(&mut self) {
        if !self.submitting {
            let _removed = self.input.pop();
        }
    }

    /// Marks the form as submitted.
    ///
    /// Returns `false` if it was already submitted, so callers can ignore
    /// repeated submits.
    pub const fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Re-enables editing after a failed submission.
    pub const fn end_submit(&mut self) {
        self.submitting = false;
    }
}

/// Read-only detail popup, empty until the record arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    aadhar_number: AadharNumber,
    ticket: RequestTicket,
    detail: Option<ApplicationDetail>,
}

impl DetailView {
    /// Application being viewed.
    #[must_use]
    pub const fn aadhar_number(&self) -> &AadharNumber {
        &self.aadhar_number
    }

    /// Loaded record, if it has arrived.
    #[must_use]
    pub const fn detail(&self) -> Option<&ApplicationDetail> {
        self.detail.as_ref()
    }

    /// Stores the loaded record.
    pub fn set_detail(&mut self, detail: ApplicationDetail) {
        self.detail = Some(detail);
    }
}

/// The popup currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Popup {
    /// No popup; the table has focus.
    #[default]
    Closed,
    /// Collecting a review message before reverting.
    Revert(TextForm),
    /// Collecting a sanctioned amount before approving.
    Approve(TextForm),
    /// Showing one application's full record.
    View(DetailView),
}

impl Popup {
    /// Opens the revert popup for `aadhar_number`.
    #[must_use]
    pub fn revert(aadhar_number: AadharNumber, ticket: RequestTicket) -> Self {
        Self::Revert(TextForm::new(aadhar_number, ticket, true))
    }

    /// Opens the approve popup for `aadhar_number`.
    #[must_use]
    pub fn approve(aadhar_number: AadharNumber, ticket: RequestTicket) -> Self {
        Self::Approve(TextForm::new(aadhar_number, ticket, false))
    }

    /// Opens the detail popup for `aadhar_number` in its loading state.
    #[must_use]
    pub const fn view(aadhar_number: AadharNumber, ticket: RequestTicket) -> Self {
        Self::View(DetailView {
            aadhar_number,
            ticket,
            detail: None,
        })
    }

    /// Which popup is open, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<PopupKind> {
        match self {
            Self::Closed => None,
            Self::Revert(_) => Some(PopupKind::Revert),
            Self::Approve(_) => Some(PopupKind::Approve),
            Self::View(_) => Some(PopupKind::View),
        }
    }

    /// Returns true when any popup is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Ticket of the open popup.
    #[must_use]
    pub const fn ticket(&self) -> Option<RequestTicket> {
        match self {
            Self::Closed => None,
            Self::Revert(form) | Self::Approve(form) => Some(form.ticket),
            Self::View(view) => Some(view.ticket),
        }
    }

    /// Returns true if a response carrying `ticket` may still be applied.
    #[must_use]
    pub fn accepts(&self, ticket: RequestTicket) -> bool {
        self.ticket() == Some(ticket)
    }

    /// Text form of the open popup, if it has one.
    #[must_use]
    pub const fn form(&self) -> Option<&TextForm> {
        match self {
            Self::Revert(form) | Self::Approve(form) => Some(form),
            Self::Closed | Self::View(_) => None,
        }
    }

    /// Mutable text form of the open popup, if it has one.
    pub const fn form_mut(&mut self) -> Option<&mut TextForm> {
        match self {
            Self::Revert(form) | Self::Approve(form) => Some(form),
            Self::Closed | Self::View(_) => None,
        }
    }

    /// Closes the popup, discarding its input and loaded data.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn issuer() -> TicketIssuer {
        TicketIssuer::default()
    }

    #[rstest]
    fn tickets_are_unique(mut issuer: TicketIssuer) {
        let first = issuer.issue();
        let second = issuer.issue();
        assert_ne!(first, second);
        assert!(second.value() > first.value());
    }

    #[rstest]
    fn closed_popup_accepts_nothing(mut issuer: TicketIssuer) {
        let ticket = issuer.issue();
        let mut popup = Popup::revert(AadharNumber::from("1111"), ticket);
        assert!(popup.accepts(ticket));

        popup.close();

        assert!(!popup.accepts(ticket));
        assert_eq!(popup.kind(), None);
    }

    #[rstest]
    fn reopened_popup_rejects_previous_ticket(mut issuer: TicketIssuer) {
        let stale = issuer.issue();
        let mut popup = Popup::approve(AadharNumber::from("1111"), stale);
        popup.close();
        popup = Popup::approve(AadharNumber::from("1111"), issuer.issue());

        assert!(!popup.accepts(stale));
    }

    #[rstest]
    fn reopening_starts_with_empty_input(mut issuer: TicketIssuer) {
        let mut popup = Popup::approve(AadharNumber::from("1111"), issuer.issue());
        if let Some(form) = popup.form_mut() {
            form.push_char('9');
        }
        popup.close();
        popup = Popup::approve(AadharNumber::from("1111"), issuer.issue());

        assert_eq!(popup.form().map(TextForm::input), Some(""));
    }

    #[rstest]
    fn submitting_form_ignores_edits_and_repeat_submits(mut issuer: TicketIssuer) {
        let mut popup = Popup::revert(AadharNumber::from("1111"), issuer.issue());
        let form = popup.form_mut().expect("revert popup has a form");
        form.push_char('o');
        form.push_char('k');

        assert!(form.begin_submit());
        assert!(!form.begin_submit());
        form.push_char('!');
        form.backspace();
        assert_eq!(form.input(), "ok");

        form.end_submit();
        form.backspace();
        assert_eq!(form.input(), "o");
    }

    #[rstest]
    #[case::revert(
        Popup::revert(AadharNumber::from("1111"), TicketIssuer::default().issue()),
        "a\nb"
    )]
    #[case::approve(
        Popup::approve(AadharNumber::from("1111"), TicketIssuer::default().issue()),
        "ab"
    )]
    fn line_breaks_only_enter_multiline_forms(#[case] mut popup: Popup, #[case] expected: &str) {
        let form = popup.form_mut().expect("popup has a form");
        for ch in "a\nb".chars() {
            form.push_char(ch);
        }

        assert_eq!(form.input(), expected);
    }

    #[rstest]
    fn view_popup_starts_without_detail(mut issuer: TicketIssuer) {
        let popup = Popup::view(AadharNumber::from("1111"), issuer.issue());
        let Popup::View(view) = &popup else {
            panic!("expected view popup");
        };

        assert!(view.detail().is_none());
        assert!(popup.form().is_none());
        assert_eq!(popup.kind(), Some(PopupKind::View));
    }
}
