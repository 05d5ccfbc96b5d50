//! Behavioural tests for reviewing loan applications end to end.

#[path = "approval_flow_bdd/mod.rs"]
mod approval_flow_bdd_support;

use approval_flow_bdd_support::{ReviewState, ensure_runtime_and_server, select_application};
use loan_admin::tui::app::test_support::{dispatch, load};
use loan_admin::tui::messages::AppMsg;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APPROVE_PATH: &str = "/admin/approve-loan";

#[fixture]
fn review_state() -> ReviewState {
    ReviewState::default()
}

fn mount(review_state: &ReviewState, mock: Mock) {
    let runtime = ensure_runtime_and_server(review_state);
    review_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

fn type_text(text: &str) -> Vec<AppMsg> {
    text.chars().map(AppMsg::InputChar).collect()
}

// Given steps

#[given("a loan service listing application {aadhar} as Pending")]
fn given_pending_application(review_state: &ReviewState, aadhar: String) {
    let body = json!({
        "data": [
            {"aadharNumber": "9999", "fullName": "Other Applicant", "loanStatus": "Pending"},
            {
                "aadharNumber": aadhar,
                "fullName": "Arjun Mehta",
                "bankName": "SBI",
                "loanAmount": 250_000,
                "repaymentMonths": 24,
                "loanStatus": "Pending"
            }
        ]
    });
    mount(
        review_state,
        Mock::given(method("GET"))
            .and(path("/admin/loan-applications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body)),
    );
}

#[given("a loan service that fails to list applications")]
fn given_failing_listing(review_state: &ReviewState) {
    mount(
        review_state,
        Mock::given(method("GET"))
            .and(path("/admin/loan-applications"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom")),
    );
}

#[given("the service accepts approvals")]
fn given_approvals_accepted(review_state: &ReviewState) {
    mount(
        review_state,
        Mock::given(method("POST"))
            .and(path(APPROVE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true}))),
    );
}

#[given("the service accepts status updates")]
fn given_status_updates_accepted(review_state: &ReviewState) {
    mount(
        review_state,
        Mock::given(method("POST"))
            .and(path("/admin/update-loan-status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true}))),
    );
}

// When steps

#[when("the console loads the applications")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn when_console_loads(review_state: &ReviewState) {
    let runtime = ensure_runtime_and_server(review_state);
    let mut app = review_state.build_app();
    runtime.block_on(load(&mut app));
    review_state.app.set(app);
    assert!(
        review_state
            .app
            .with_ref(|app| !app.store().is_loading())
            .expect("app not initialised"),
        "load should have finished"
    );
}

#[when("the admin approves application {aadhar} with amount {amount}")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn when_admin_approves(review_state: &ReviewState, aadhar: String, amount: String) {
    let runtime = ensure_runtime_and_server(review_state);
    let typed = amount.trim_matches('"').to_owned();

    review_state
        .app
        .with_mut(|app| {
            runtime.block_on(async {
                select_application(app, &aadhar).await;
                dispatch(app, AppMsg::ApproveSelected).await;
                for msg in type_text(&typed) {
                    dispatch(app, msg).await;
                }
                dispatch(app, AppMsg::SubmitPopup).await;
            });
        })
        .expect("app not initialised");
}

#[when("the admin reverts application {aadhar} with message {message}")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn when_admin_reverts(review_state: &ReviewState, aadhar: String, message: String) {
    let runtime = ensure_runtime_and_server(review_state);
    let typed = message.trim_matches('"').to_owned();

    review_state
        .app
        .with_mut(|app| {
            runtime.block_on(async {
                select_application(app, &aadhar).await;
                dispatch(app, AppMsg::RevertSelected).await;
                for msg in type_text(&typed) {
                    dispatch(app, msg).await;
                }
                dispatch(app, AppMsg::SubmitPopup).await;
            });
        })
        .expect("app not initialised");
}

// Then steps

fn approval_bodies(review_state: &ReviewState) -> Vec<Value> {
    let runtime = ensure_runtime_and_server(review_state);
    let requests = review_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .unwrap_or_else(|| panic!("mock server should record requests"));

    requests
        .iter()
        .filter(|request| request.url.path() == APPROVE_PATH)
        .map(|request| {
            serde_json::from_slice(&request.body)
                .unwrap_or_else(|error| panic!("approval body should be JSON: {error}"))
        })
        .collect()
}

#[then("the service received an approval of {amount:u64} for application {aadhar}")]
fn then_approval_received(review_state: &ReviewState, amount: u64, aadhar: String) {
    assert_eq!(
        approval_bodies(review_state),
        vec![json!({
            "aadharNumber": aadhar,
            "status": "Approved",
            "sanctionedAmount": amount,
        })]
    );
}

#[then("no approval was sent to the service")]
fn then_no_approval_sent(review_state: &ReviewState) {
    assert!(approval_bodies(review_state).is_empty());
}

#[then("application {aadhar} shows status {status}")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_application_status(review_state: &ReviewState, aadhar: String, status: String) {
    let actual = review_state
        .app
        .with_ref(|app| {
            app.applications()
                .iter()
                .find(|application| application.aadhar_number.as_str() == aadhar)
                .map(|application| application.loan_status.as_str().to_owned())
        })
        .expect("app not initialised");

    assert_eq!(actual.as_deref(), Some(status.trim_matches('"')));
}

#[then("application {aadhar} has review message {message}")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_review_message(review_state: &ReviewState, aadhar: String, message: String) {
    let actual = review_state
        .app
        .with_ref(|app| {
            app.applications()
                .iter()
                .find(|application| application.aadhar_number.as_str() == aadhar)
                .and_then(|application| application.review_message.clone())
        })
        .expect("app not initialised");

    assert_eq!(actual.as_deref(), Some(message.trim_matches('"')));
}

#[then("the alert reads {text}")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_alert_reads(review_state: &ReviewState, text: String) {
    let message = review_state
        .app
        .with_ref(|app| app.alert().map(|alert| alert.message.clone()))
        .expect("app not initialised");

    assert_eq!(message.as_deref(), Some(text.trim_matches('"')));
}

#[then("the console shows {text}")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_console_shows(review_state: &ReviewState, text: String) {
    let expected = text.trim_matches('"').to_owned();
    let (error, frame) = review_state
        .app
        .with_ref(|app| {
            (
                app.store().load_error().map(ToOwned::to_owned),
                bubbletea_rs::Model::view(app),
            )
        })
        .expect("app not initialised");

    assert_eq!(error.as_deref(), Some(expected.as_str()));
    assert!(frame.contains(&expected), "frame should show the error:\n{frame}");
}

// Scenario bindings

#[scenario(path = "tests/features/approval_flow.feature", index = 0)]
fn approving_a_pending_application(review_state: ReviewState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/approval_flow.feature", index = 1)]
fn reverting_with_a_review_message(review_state: ReviewState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/approval_flow.feature", index = 2)]
fn rejecting_an_invalid_sanctioned_amount(review_state: ReviewState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/approval_flow.feature", index = 3)]
fn failing_to_load_the_list(review_state: ReviewState) {
    let _ = review_state;
}
