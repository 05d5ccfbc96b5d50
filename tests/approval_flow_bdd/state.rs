//! Scenario state for approval flow BDD tests.

use std::sync::Arc;

use loan_admin::HttpLoanGateway;
use loan_admin::tui::AdminApp;
use loan_admin::tui::app::test_support::dispatch;
use loan_admin::tui::messages::AppMsg;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use url::Url;
use wiremock::MockServer;

use super::runtime::{self, SharedRuntime};

/// State shared across steps in an approval flow scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct ReviewState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    /// The console model under test.
    pub(crate) app: Slot<AdminApp>,
}

impl ReviewState {
    /// Builds a console pointed at the mock server.
    #[expect(clippy::expect_used, reason = "BDD helper; panics are acceptable")]
    pub(crate) fn build_app(&self) -> AdminApp {
        let uri = self
            .server
            .with_ref(MockServer::uri)
            .expect("mock server not initialised");
        let base = Url::parse(&uri).expect("mock server URI should parse");
        let gateway = HttpLoanGateway::new(base, None).expect("gateway should build");
        AdminApp::new(Arc::new(gateway)).with_dimensions(160, 30)
    }
}

/// Ensures the runtime and mock server exist for this scenario.
#[expect(clippy::expect_used, reason = "BDD helper; panics are acceptable")]
pub(crate) fn ensure_runtime_and_server(state: &ReviewState) -> SharedRuntime {
    runtime::ensure_runtime_and_server(&state.runtime, &state.server)
        .expect("runtime and server should initialise")
}

/// Moves the cursor onto the row holding `aadhar_number`.
#[expect(clippy::expect_used, reason = "BDD helper; panics are acceptable")]
pub(crate) async fn select_application(app: &mut AdminApp, aadhar_number: &str) {
    let index = app
        .applications()
        .iter()
        .position(|application| application.aadhar_number.as_str() == aadhar_number)
        .expect("application should be listed");

    dispatch(app, AppMsg::Home).await;
    for _ in 0..index {
        dispatch(app, AppMsg::CursorDown).await;
    }
}
