//! Tokio runtime and mock loan service shared by the steps of a scenario.
//!
//! Step functions are synchronous, so each scenario owns one runtime and
//! blocks on it whenever a step needs to drive the console or the server.

use std::cell::RefCell;
use std::future::Future;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::{Builder, Runtime};
use wiremock::MockServer;

/// Runtime handle cloneable into an `rstest-bdd` slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    /// Builds a current-thread runtime with I/O and timers enabled.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while creating the runtime.
    pub fn current_thread() -> Result<Self, io::Error> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self(Rc::new(RefCell::new(runtime))))
    }

    /// Runs `future` to completion on the scenario runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Returns the scenario runtime, creating it and the mock loan service on
/// first use.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built or the slot is empty
/// after being filled.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::current_thread()?);
    }
    let shared = runtime
        .get()
        .ok_or_else(|| io::Error::other("scenario runtime missing after initialisation"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared.block_on(MockServer::start()));
    }

    Ok(shared)
}
