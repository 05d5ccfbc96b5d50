//! Main TUI application model implementing the MVU pattern.
//!
//! This module provides the core application state and update logic for the
//! loan review console. It owns the application store, the cursor, the popup
//! state machine and the alert overlay, and turns row actions into service
//! calls run as async commands.
//!
//! # Module Structure
//!
//! - `action_handlers`: Row actions and popup submissions
//! - `response_handlers`: Reconciling service responses with the store
//! - `navigation`: Cursor movement and scrolling
//! - `rendering`: View rendering methods for terminal output

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bubbletea_rs::Cmd;

use crate::config::DEFAULT_TIMESTAMP_FORMAT;
use crate::service::{LoanApplication, LoanServiceGateway};
use crate::store::ApplicationStore;
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

use super::components::ApplicationTableComponent;
use super::input::InputContext;
use super::messages::AppMsg;
use super::state::{Alert, CursorState, Popup, TicketIssuer};

mod action_handlers;
mod model_impl;
mod navigation;
mod rendering;
mod response_handlers;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Rows used by the title line and the status bar.
pub(crate) const CHROME_HEIGHT: usize = 2;

/// Rows used by the table's column header.
const TABLE_HEADER_HEIGHT: usize = 1;

/// Main application model for the loan review console.
pub struct AdminApp {
    /// Loaded applications and load state.
    pub(crate) store: ApplicationStore,
    /// Selected row and scroll position.
    pub(crate) cursor: CursorState,
    /// The open popup, if any.
    pub(crate) popup: Popup,
    /// The visible alert, if any.
    pub(crate) alert: Option<Alert>,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
    tickets: TicketIssuer,
    gateway: Arc<dyn LoanServiceGateway>,
    telemetry: Arc<dyn TelemetrySink>,
    timestamp_format: String,
    table: ApplicationTableComponent,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    load_started: bool,
}

impl fmt::Debug for AdminApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminApp")
            .field("store", &self.store)
            .field("cursor", &self.cursor)
            .field("popup", &self.popup)
            .field("alert", &self.alert)
            .field("show_help", &self.show_help)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl AdminApp {
    /// Creates an application that talks to `gateway`.
    ///
    /// The store starts in its loading state; call [`AdminApp::start_load`]
    /// (or run the app through `Model::init`) to issue the list request.
    #[must_use]
    pub fn new(gateway: Arc<dyn LoanServiceGateway>) -> Self {
        let mut app = Self {
            store: ApplicationStore::new(),
            cursor: CursorState::new(),
            popup: Popup::Closed,
            alert: None,
            show_help: false,
            tickets: TicketIssuer::default(),
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
            table: ApplicationTableComponent::new(),
            width: 80,
            height: 24,
            load_started: false,
        };
        app.set_visible_table_height();
        app
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Replaces the timestamp layout used by the table.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Sets the terminal dimensions before the first resize event arrives.
    #[must_use]
    pub fn with_dimensions(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self.set_visible_table_height();
        self
    }

    /// Applications in service order.
    #[must_use]
    pub fn applications(&self) -> &[LoanApplication] {
        self.store.applications()
    }

    /// Read access to the application store.
    #[must_use]
    pub const fn store(&self) -> &ApplicationStore {
        &self.store
    }

    /// Returns the current cursor position.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor.cursor_position
    }

    /// Returns the application under the cursor, if any.
    #[must_use]
    pub fn selected_application(&self) -> Option<&LoanApplication> {
        self.store.applications().get(self.cursor.cursor_position)
    }

    /// The open popup.
    #[must_use]
    pub const fn popup(&self) -> &Popup {
        &self.popup
    }

    /// The visible alert, if any.
    #[must_use]
    pub const fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Issues the one-time list request.
    ///
    /// Returns `None` if the load was already started.
    pub fn start_load(&mut self) -> Option<Cmd> {
        if self.load_started {
            return None;
        }
        self.load_started = true;

        let gateway = Arc::clone(&self.gateway);
        Some(Box::pin(async move {
            let started = Instant::now();
            let msg = match gateway.list_applications().await {
                Ok(applications) => AppMsg::ApplicationsLoaded {
                    applications,
                    latency_ms: elapsed_millis(started),
                },
                Err(error) => AppMsg::ApplicationsLoadFailed(error),
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        }))
    }

    /// Handles a message and updates state accordingly.
    ///
    /// This method is the core update function that processes all application
    /// messages and returns any resulting commands. It delegates to specialised
    /// handlers for each message category to keep cyclomatic complexity low.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_row_action() {
            return self.handle_row_action(msg);
        }
        if msg.is_popup_input() {
            return self.handle_popup_input(msg);
        }
        if msg.is_service_response() {
            return self.handle_service_response(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    /// Dispatches lifecycle and window messages to their handlers.
    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::DismissAlert => {
                self.alert = None;
                None
            }
            AppMsg::WindowResized { width, height } => self.handle_resize(*width, *height),
            _ => {
                debug_assert!(
                    false,
                    "non-lifecycle message routed to handle_lifecycle_msg"
                );
                None
            }
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        self.set_visible_table_height();
        self.cursor.ensure_visible(self.table.visible_height());
        None
    }

    /// Rows available between the title line and the status bar.
    pub(crate) const fn body_height(&self) -> usize {
        (self.height as usize).saturating_sub(CHROME_HEIGHT)
    }

    fn set_visible_table_height(&mut self) {
        let rows = self
            .body_height()
            .saturating_sub(TABLE_HEADER_HEIGHT)
            .max(1);
        self.table.set_visible_height(rows);
    }

    /// Returns the current input context for context-aware key mapping.
    pub(crate) const fn input_context(&self) -> InputContext {
        match &self.popup {
            Popup::Closed => InputContext::Table,
            Popup::Revert(_) | Popup::Approve(_) => InputContext::TextEntry,
            Popup::View(_) => InputContext::DetailView,
        }
    }
}

fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod action_handlers_tests;
