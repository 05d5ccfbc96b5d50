//! Tests for row actions, popup submissions and response reconciliation.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::action_handlers::INVALID_AMOUNT_MESSAGE;
use super::response_handlers::APPROVED_MESSAGE;
use super::test_support::{dispatch, run_command};
use super::*;
use crate::service::{
    AadharNumber, ApplicationDetail, ApprovalRequest, LoanServiceError, LoanStatus,
    MockLoanServiceGateway, SanctionedAmount, ServiceOperation, StatusUpdateRequest,
};
use crate::telemetry::{RecordingTelemetrySink, TelemetryEvent};
use crate::tui::state::{AlertKind, PopupKind, TextForm};

fn applications() -> Vec<LoanApplication> {
    vec![
        LoanApplication {
            full_name: "Arjun Mehta".to_owned(),
            ..LoanApplication::pending("1111")
        },
        LoanApplication {
            full_name: "Bela Kapoor".to_owned(),
            loan_status: LoanStatus::Approved,
            sanctioned_amount: Some(90_000.0),
            ..LoanApplication::pending("2222")
        },
    ]
}

fn loaded_app(gateway: MockLoanServiceGateway) -> AdminApp {
    let mut app = AdminApp::new(Arc::new(gateway));
    app.handle_message(&AppMsg::ApplicationsLoaded {
        applications: applications(),
        latency_ms: 5,
    });
    app
}

fn type_text(app: &mut AdminApp, text: &str) {
    for character in text.chars() {
        app.handle_message(&AppMsg::InputChar(character));
    }
}

fn record<'a>(app: &'a AdminApp, id: &str) -> &'a LoanApplication {
    app.store()
        .find(&AadharNumber::from(id))
        .expect("application should be loaded")
}

fn network_error(operation: ServiceOperation) -> LoanServiceError {
    LoanServiceError::Network {
        operation,
        message: "connection refused".to_owned(),
    }
}

fn refused(operation: ServiceOperation) -> LoanServiceError {
    LoanServiceError::Status {
        operation,
        status: 500,
        message: "boom".to_owned(),
    }
}

#[fixture]
fn idle_gateway() -> MockLoanServiceGateway {
    let mut gateway = MockLoanServiceGateway::new();
    gateway.expect_update_status().never();
    gateway.expect_approve_loan().never();
    gateway.expect_view_application().never();
    gateway
}

#[tokio::test]
async fn reject_sends_rejected_without_message_and_patches_row() {
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_update_status()
        .with(eq(StatusUpdateRequest::reject(AadharNumber::from("2222"))))
        .times(1)
        .returning(|_| Ok(()));
    let mut app = loaded_app(gateway);
    dispatch(&mut app, AppMsg::CursorDown).await;

    dispatch(&mut app, AppMsg::RejectSelected).await;

    let bela = record(&app, "2222");
    assert_eq!(bela.loan_status, LoanStatus::Rejected);
    assert_eq!(bela.review_message, None);
    assert_eq!(
        app.alert().map(|alert| alert.message.as_str()),
        Some("Loan status updated to Rejected successfully!")
    );
}

#[rstest]
#[case::refused(refused(ServiceOperation::UpdateStatus), "Failed to update loan status.")]
#[case::unreachable(
    network_error(ServiceOperation::UpdateStatus),
    "An error occurred while updating the loan status."
)]
#[tokio::test]
async fn reject_failure_alerts_and_leaves_row(
    #[case] error: LoanServiceError,
    #[case] expected: &str,
) {
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_update_status()
        .times(1)
        .returning(move |_| Err(error.clone()));
    let mut app = loaded_app(gateway);

    dispatch(&mut app, AppMsg::RejectSelected).await;

    assert_eq!(record(&app, "1111").loan_status, LoanStatus::Pending);
    let alert = app.alert().expect("failure should raise an alert");
    assert_eq!(alert.kind, AlertKind::Error);
    assert_eq!(alert.message, expected);
}

#[rstest]
#[case::with_text("Missing payslips")]
#[case::empty("")]
#[case::multiline("Missing payslips\nResubmit with bank statement")]
#[tokio::test]
async fn revert_stores_message_exactly_as_typed(#[case] message: &str) {
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_update_status()
        .with(eq(StatusUpdateRequest::revert(
            AadharNumber::from("1111"),
            message,
        )))
        .times(1)
        .returning(|_| Ok(()));
    let mut app = loaded_app(gateway);

    dispatch(&mut app, AppMsg::RevertSelected).await;
    assert_eq!(app.popup().kind(), Some(PopupKind::Revert));
    type_text(&mut app, message);
    dispatch(&mut app, AppMsg::SubmitPopup).await;

    let arjun = record(&app, "1111");
    assert_eq!(arjun.loan_status, LoanStatus::Reverted);
    assert_eq!(arjun.review_message.as_deref(), Some(message));
    assert!(!app.popup().is_open());
    assert_eq!(
        app.alert().map(|alert| alert.message.as_str()),
        Some("Loan status updated to Reverted successfully!")
    );
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
#[case::not_a_number("abc")]
#[case::zero("0")]
#[case::negative("-5")]
#[tokio::test]
async fn approve_rejects_invalid_amounts_locally(
    idle_gateway: MockLoanServiceGateway,
    #[case] input: &str,
) {
    let mut app = loaded_app(idle_gateway);

    dispatch(&mut app, AppMsg::ApproveSelected).await;
    type_text(&mut app, input);
    dispatch(&mut app, AppMsg::SubmitPopup).await;

    assert_eq!(
        app.alert().map(|alert| alert.message.as_str()),
        Some(INVALID_AMOUNT_MESSAGE)
    );
    assert_eq!(app.popup().kind(), Some(PopupKind::Approve));
    assert_eq!(record(&app, "1111").loan_status, LoanStatus::Pending);
}

#[tokio::test]
async fn approve_sends_exact_amount_and_patches_row() {
    let amount = SanctionedAmount::parse("1500.50").expect("amount should parse");
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_approve_loan()
        .with(eq(ApprovalRequest::new(AadharNumber::from("1111"), amount)))
        .times(1)
        .returning(|_| Ok(()));
    let telemetry = Arc::new(RecordingTelemetrySink::default());
    let mut app = loaded_app(gateway).with_telemetry(telemetry.clone());

    dispatch(&mut app, AppMsg::ApproveSelected).await;
    type_text(&mut app, "1500.50");
    dispatch(&mut app, AppMsg::SubmitPopup).await;

    let arjun = record(&app, "1111");
    assert_eq!(arjun.loan_status, LoanStatus::Approved);
    assert_eq!(arjun.sanctioned_amount, Some(1500.5));
    assert!(!app.popup().is_open());
    assert_eq!(
        app.alert().map(|alert| alert.message.as_str()),
        Some(APPROVED_MESSAGE)
    );
    assert_eq!(
        telemetry.take(),
        vec![TelemetryEvent::decision(LoanStatus::Approved)]
    );
}

#[tokio::test]
async fn approve_failure_keeps_popup_for_retry() {
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_approve_loan()
        .times(1)
        .returning(|_| Err(network_error(ServiceOperation::ApproveLoan)));
    let mut app = loaded_app(gateway);

    dispatch(&mut app, AppMsg::ApproveSelected).await;
    type_text(&mut app, "5000");
    dispatch(&mut app, AppMsg::SubmitPopup).await;

    assert_eq!(
        app.alert().map(|alert| alert.message.as_str()),
        Some("An error occurred while approving the loan.")
    );
    let form = app.popup().form().expect("approve popup should stay open");
    assert!(!form.is_submitting());
    assert_eq!(form.input(), "5000");
    assert_eq!(record(&app, "1111").loan_status, LoanStatus::Pending);
}

#[rstest]
#[tokio::test]
async fn repeated_submit_is_ignored_while_in_flight(idle_gateway: MockLoanServiceGateway) {
    let mut app = loaded_app(idle_gateway);
    dispatch(&mut app, AppMsg::RevertSelected).await;
    type_text(&mut app, "again");

    // The command is never awaited, so the gateway is never called.
    let first = app.handle_message(&AppMsg::SubmitPopup);
    let second = app.handle_message(&AppMsg::SubmitPopup);

    assert!(first.is_some());
    assert!(second.is_none());
}

#[tokio::test]
async fn response_for_closed_popup_is_discarded() {
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_approve_loan()
        .times(1)
        .returning(|_| Ok(()));
    let mut app = loaded_app(gateway);
    dispatch(&mut app, AppMsg::ApproveSelected).await;
    type_text(&mut app, "5000");

    let cmd = app
        .handle_message(&AppMsg::SubmitPopup)
        .expect("valid amount should start a request");
    app.handle_message(&AppMsg::ClosePopup);
    let response = run_command(cmd).await.expect("command should produce a message");
    app.handle_message(&response);

    assert_eq!(record(&app, "1111").loan_status, LoanStatus::Pending);
    assert!(app.alert().is_none());
}

#[tokio::test]
async fn view_loads_detail_into_popup_and_close_discards_it() {
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_view_application()
        .with(eq(AadharNumber::from("1111")))
        .times(1)
        .returning(|_| {
            let mut fields = serde_json::Map::new();
            fields.insert("aadharNumber".to_owned(), serde_json::json!("1111"));
            Ok(ApplicationDetail::new(fields))
        });
    let mut app = loaded_app(gateway);

    dispatch(&mut app, AppMsg::ViewSelected).await;

    let Popup::View(view) = app.popup() else {
        panic!("view popup should be open");
    };
    assert_eq!(view.detail().map(ApplicationDetail::len), Some(1));

    dispatch(&mut app, AppMsg::ClosePopup).await;
    assert_eq!(app.popup(), &Popup::Closed);
    assert_eq!(app.applications(), applications().as_slice());
}

#[tokio::test]
async fn detail_for_replaced_popup_is_discarded() {
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_view_application()
        .times(1)
        .returning(|_| Ok(ApplicationDetail::default()));
    let mut app = loaded_app(gateway);

    let stale = app
        .handle_message(&AppMsg::ViewSelected)
        .expect("view should fetch the record");
    app.handle_message(&AppMsg::ClosePopup);
    app.handle_message(&AppMsg::CursorDown);
    let _current = app.handle_message(&AppMsg::ViewSelected);

    let response = run_command(stale).await.expect("command should produce a message");
    app.handle_message(&response);

    let Popup::View(view) = app.popup() else {
        panic!("second view popup should be open");
    };
    assert_eq!(view.aadhar_number(), &AadharNumber::from("2222"));
    assert!(view.detail().is_none());
}

#[tokio::test]
async fn view_failure_closes_popup_and_alerts() {
    let mut gateway = MockLoanServiceGateway::new();
    gateway
        .expect_view_application()
        .times(1)
        .returning(|_| Err(refused(ServiceOperation::ViewApplication)));
    let mut app = loaded_app(gateway);

    dispatch(&mut app, AppMsg::ViewSelected).await;

    assert!(!app.popup().is_open());
    assert_eq!(
        app.alert().map(|alert| alert.message.as_str()),
        Some("Failed to fetch application details.")
    );
}

#[rstest]
#[tokio::test]
async fn reopened_form_starts_empty(idle_gateway: MockLoanServiceGateway) {
    let mut app = loaded_app(idle_gateway);
    dispatch(&mut app, AppMsg::RevertSelected).await;
    type_text(&mut app, "draft");
    dispatch(&mut app, AppMsg::ClosePopup).await;

    dispatch(&mut app, AppMsg::RevertSelected).await;

    assert_eq!(app.popup().form().map(TextForm::input), Some(""));
}

#[rstest]
#[tokio::test]
async fn actions_need_a_selected_row(idle_gateway: MockLoanServiceGateway) {
    let mut gateway = idle_gateway;
    gateway.expect_list_applications().never();
    let mut app = AdminApp::new(Arc::new(gateway));

    assert!(app.handle_message(&AppMsg::RejectSelected).is_none());
    assert!(app.handle_message(&AppMsg::ApproveSelected).is_none());
    assert!(!app.popup().is_open());
}
