//! Drives an [`AdminApp`] without a terminal.
//!
//! Commands returned by the update function are awaited in place and the
//! messages they produce are fed back in, so a test can run a whole
//! interaction (key press, service call, response) with one call.

use std::collections::VecDeque;

use bubbletea_rs::Cmd;

use super::AdminApp;
use crate::tui::messages::AppMsg;

/// Handles `msg`, then every message produced by the resulting commands,
/// until no command is left.
pub async fn dispatch(app: &mut AdminApp, msg: AppMsg) {
    let mut pending = VecDeque::from([msg]);
    while let Some(next) = pending.pop_front() {
        if let Some(cmd) = app.handle_message(&next) {
            pending.extend(run_command(cmd).await);
        }
    }
}

/// Issues the initial list load and applies its result.
pub async fn load(app: &mut AdminApp) {
    let Some(cmd) = app.start_load() else {
        return;
    };
    if let Some(msg) = run_command(cmd).await {
        dispatch(app, msg).await;
    }
}

/// Awaits a command and returns the app message it produced, if any.
///
/// Framework messages such as quit are dropped.
pub async fn run_command(cmd: Cmd) -> Option<AppMsg> {
    let produced = cmd.await?;
    produced.downcast::<AppMsg>().ok().map(|msg| *msg)
}

/// Builds `count` pending applications with identifiers `0`, `1`, ...
#[must_use]
pub fn numbered_applications(count: usize) -> Vec<crate::service::LoanApplication> {
    (0..count)
        .map(|index| crate::service::LoanApplication {
            full_name: format!("Applicant {index}"),
            ..crate::service::LoanApplication::pending(index.to_string())
        })
        .collect()
}
