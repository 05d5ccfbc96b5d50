//! State management for the review console.
//!
//! This module provides the cursor over the applications table, the popup
//! state machine (including the request tickets used to discard responses
//! for popups that have since closed) and the alert overlay.

mod alert;
mod cursor;
mod popup;

pub use alert::{Alert, AlertKind};
pub use cursor::CursorState;
pub use popup::{DetailView, Popup, PopupKind, RequestTicket, TextForm, TicketIssuer};
