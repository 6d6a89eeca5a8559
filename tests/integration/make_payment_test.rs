//! Integration tests for the payment chain

mod support;

use ecg_client::error::TOKEN_FAILURE_MESSAGE;
use ecg_client::{ErrorKind, RequestParams, Step};
use support::*;
use wiremock::{MockServer, ResponseTemplate};

const PAYMENT_ACCEPTED: &str = r#"{"status":"PENDING","transactionId":"TX-90210"}"#;

fn payment_params() -> RequestParams {
    RequestParams::for_payment("P12345678", "0244000111", "MTN", "VCH-5521", "25.50").unwrap()
}

/// Parsed from text so the amount keeps the trailing zero the caller typed
fn expected_payment_body() -> serde_json::Value {
    serde_json::from_str(
        r#"{
            "MeterId": "mid-P12345678",
            "AccountNumber": "ACC-001",
            "MeterNumber": "P12345678",
            "VoucherNumber": "VCH-5521",
            "MobileNumber": "0244000111",
            "Amount": 25.50,
            "Network": "MTN"
        }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn test_make_payment_concatenates_balance_and_payment() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_meter_chain(&server, "ACC-001", "P12345678").await;
    mount_payment(
        &server,
        expected_payment_body(),
        ResponseTemplate::new(200).set_body_string(PAYMENT_ACCEPTED),
        1,
    )
    .await;

    let client = orchestrator(&server);
    let report = client
        .make_payment(&payment_params())
        .await
        .expect("payment chain should succeed");

    assert_eq!(report.balance.body, balance_body("P12345678"));
    assert_eq!(report.payment_body, PAYMENT_ACCEPTED);

    let requests = server.received_requests().await.expect("recording enabled");
    let payment = requests
        .iter()
        .find(|request| request.url.path() == PAYMENT_PATH)
        .expect("payment was sent");
    let sent = String::from_utf8(payment.body.clone()).expect("UTF-8 body");
    assert!(sent.contains("\"Amount\":25.50"), "payment body was {}", sent);
    assert_eq!(
        report.combined_text(),
        format!("{}\n{}", balance_body("P12345678"), PAYMENT_ACCEPTED)
    );
}

#[tokio::test]
async fn test_make_payment_text_matches_combined_report() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_meter_chain(&server, "ACC-001", "P12345678").await;
    mount_payment(
        &server,
        expected_payment_body(),
        ResponseTemplate::new(200).set_body_string(PAYMENT_ACCEPTED),
        1,
    )
    .await;

    let text = orchestrator(&server).make_payment_text(&payment_params()).await;

    assert_eq!(text, format!("{}\n{}", balance_body("P12345678"), PAYMENT_ACCEPTED));
}

#[tokio::test]
async fn test_declined_payment_returns_payment_body() {
    let server = MockServer::start().await;
    let declined = r#"{"message":"Voucher already used"}"#;

    mount_token(&server, 1).await;
    mount_meter_chain(&server, "ACC-001", "P12345678").await;
    mount_payment(
        &server,
        expected_payment_body(),
        ResponseTemplate::new(422).set_body_string(declined),
        1,
    )
    .await;

    let err = orchestrator(&server)
        .make_payment(&payment_params())
        .await
        .expect_err("payment declined");

    assert_eq!(err.step(), Some(Step::Payment));
    assert_eq!(err.kind(), ErrorKind::RemoteStatus);
    assert_eq!(err.legacy_text(), declined);
}

#[tokio::test]
async fn test_balance_failure_skips_payment() {
    let server = MockServer::start().await;
    let verify = verify_body("ACC-001", "P12345678");

    mount_token(&server, 1).await;
    mount_verify(
        &server,
        "P12345678",
        ResponseTemplate::new(200).set_body_string(verify.clone()),
        1,
    )
    .await;
    mount_register(&server, &verify, ResponseTemplate::new(200), 1).await;
    mount_balance(
        &server,
        "ACC-001",
        "P12345678",
        ResponseTemplate::new(503).set_body_string("Dashboard unavailable"),
        1,
    )
    .await;
    forbid(&server, PAYMENT_PATH).await;

    let text = orchestrator(&server).make_payment_text(&payment_params()).await;

    assert_eq!(text, "Dashboard unavailable");
}

#[tokio::test]
async fn test_rejected_credentials_skip_every_other_call() {
    let server = MockServer::start().await;
    mount_token_response(&server, ResponseTemplate::new(401)).await;
    forbid(&server, VERIFY_PATH).await;
    forbid(&server, REGISTER_PATH).await;
    forbid(&server, PAYMENT_PATH).await;

    let text = orchestrator(&server).make_payment_text(&payment_params()).await;

    assert_eq!(text, TOKEN_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_rejected_meter_skips_payment() {
    let server = MockServer::start().await;
    let rejection = r#"{"message":"Invalid meter number"}"#;

    mount_token(&server, 1).await;
    mount_verify(
        &server,
        "P12345678",
        ResponseTemplate::new(400).set_body_string(rejection),
        1,
    )
    .await;
    forbid(&server, REGISTER_PATH).await;
    forbid(&server, PAYMENT_PATH).await;

    let text = orchestrator(&server).make_payment_text(&payment_params()).await;

    assert_eq!(text, rejection);
}

#[tokio::test]
async fn test_payment_without_details_makes_no_calls() {
    let server = MockServer::start().await;
    forbid(&server, TOKEN_PATH).await;

    let params = RequestParams::for_balance("P12345678").unwrap();
    let err = orchestrator(&server)
        .make_payment(&params)
        .await
        .expect_err("no payment details");

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.step(), None);
}
