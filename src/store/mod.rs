//! Client-side store for loan applications.
//!
//! The store owns the list shown by the console and its load state. It is
//! populated once and then patched in place, record by record, keyed by
//! Aadhar number; it never re-fetches after a mutation. The update functions
//! are pure with respect to the network: handlers call them only after the
//! service has confirmed a change.

use crate::service::{AadharNumber, LoanApplication, LoanStatus, SanctionedAmount};

/// Progress of the one-time list load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The request is in flight.
    #[default]
    Loading,
    /// The list was received.
    Loaded,
    /// The list could not be loaded; the message replaces the table.
    Failed(String),
}

/// The applications list and its load state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplicationStore {
    applications: Vec<LoanApplication>,
    load_state: LoadState,
}

impl ApplicationStore {
    /// Creates an empty store awaiting its first load.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applications: Vec::new(),
            load_state: LoadState::Loading,
        }
    }

    /// Applications in service order.
    #[must_use]
    pub fn applications(&self) -> &[LoanApplication] {
        &self.applications
    }

    /// Number of applications held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.applications.len()
    }

    /// Returns true when no applications are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    /// Current load state.
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Returns true while the list request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    /// Message shown in place of the table after a failed load.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(message) => Some(message.as_str()),
            LoadState::Loading | LoadState::Loaded => None,
        }
    }

    /// Replaces the contents with a freshly loaded list, keeping its order.
    pub fn replace_all(&mut self, applications: Vec<LoanApplication>) {
        self.applications = applications;
        self.load_state = LoadState::Loaded;
    }

    /// Records a failed load. Any previously held rows are dropped so the
    /// table is not rendered alongside the error.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        self.applications.clear();
        self.load_state = LoadState::Failed(message.into());
    }

    /// Finds an application by identifier.
    #[must_use]
    pub fn find(&self, aadhar_number: &AadharNumber) -> Option<&LoanApplication> {
        self.applications
            .iter()
            .find(|application| &application.aadhar_number == aadhar_number)
    }

    /// Sets the status (and message, when provided) on every matching record.
    ///
    /// Returns `true` if at least one record was patched.
    pub fn apply_status(
        &mut self,
        aadhar_number: &AadharNumber,
        status: LoanStatus,
        review_message: Option<&str>,
    ) -> bool {
        self.patch(aadhar_number, |application| {
            with_status(application, status, review_message)
        })
    }

    /// Marks every matching record approved with the sanctioned amount.
    ///
    /// Returns `true` if at least one record was patched.
    pub fn apply_approval(
        &mut self,
        aadhar_number: &AadharNumber,
        amount: SanctionedAmount,
    ) -> bool {
        self.patch(aadhar_number, |application| with_approval(application, amount))
    }

    fn patch<F>(&mut self, aadhar_number: &AadharNumber, update: F) -> bool
    where
        F: Fn(&LoanApplication) -> LoanApplication,
    {
        let mut patched = false;
        for application in self
            .applications
            .iter_mut()
            .filter(|application| &application.aadhar_number == aadhar_number)
        {
            *application = update(application);
            patched = true;
        }
        patched
    }
}

/// Returns a copy of `application` with a new status.
///
/// The review message is replaced only when one is provided.
#[must_use]
pub fn with_status(
    application: &LoanApplication,
    status: LoanStatus,
    review_message: Option<&str>,
) -> LoanApplication {
    LoanApplication {
        loan_status: status,
        review_message: review_message
            .map(ToOwned::to_owned)
            .or_else(|| application.review_message.clone()),
        ..application.clone()
    }
}

/// Returns a copy of `application` approved for `amount`.
#[must_use]
pub fn with_approval(application: &LoanApplication, amount: SanctionedAmount) -> LoanApplication {
    LoanApplication {
        loan_status: LoanStatus::Approved,
        sanctioned_amount: Some(amount.value()),
        ..application.clone()
    }
}
