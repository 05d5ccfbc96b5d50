//! Support modules for the approval flow BDD tests.

#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{ReviewState, ensure_runtime_and_server, select_application};
