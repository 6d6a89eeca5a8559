//! Concurrent calls must not see each other's meter records

mod support;

use ecg_client::RequestParams;
use serde_json::json;
use support::*;
use wiremock::{MockServer, ResponseTemplate};

const ROUNDS: u64 = 8;

struct MeterFixture {
    account_number: &'static str,
    meter_number: &'static str,
    voucher: &'static str,
}

const METERS: [MeterFixture; 2] = [
    MeterFixture {
        account_number: "ACC-AAA",
        meter_number: "P-ALPHA",
        voucher: "VCH-A",
    },
    MeterFixture {
        account_number: "ACC-BBB",
        meter_number: "P-BRAVO",
        voucher: "VCH-B",
    },
];

async fn mount_fixture(server: &MockServer, meter: &MeterFixture) {
    let verify = verify_body(meter.account_number, meter.meter_number);
    mount_verify(
        server,
        meter.meter_number,
        ResponseTemplate::new(200).set_body_string(verify.clone()),
        ROUNDS,
    )
    .await;
    mount_register(server, &verify, ResponseTemplate::new(200), ROUNDS).await;
    mount_balance(
        server,
        meter.account_number,
        meter.meter_number,
        ResponseTemplate::new(200).set_body_string(balance_body(meter.meter_number)),
        ROUNDS,
    )
    .await;
    mount_payment(
        server,
        json!({
            "MeterId": format!("mid-{}", meter.meter_number),
            "AccountNumber": meter.account_number,
            "MeterNumber": meter.meter_number,
            "VoucherNumber": meter.voucher,
            "MobileNumber": "0200000000",
            "Amount": 10,
            "Network": "VODAFONE"
        }),
        ResponseTemplate::new(200).set_body_string(format!("paid {}", meter.meter_number)),
        ROUNDS,
    )
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_payments_keep_meter_records_apart() {
    let server = MockServer::start().await;
    mount_token(&server, ROUNDS * 2).await;
    for meter in &METERS {
        mount_fixture(&server, meter).await;
    }

    let client = orchestrator(&server);
    let mut handles = Vec::new();
    for _ in 0..ROUNDS {
        for meter in &METERS {
            let client = client.clone();
            let params = RequestParams::for_payment(
                meter.meter_number,
                "0200000000",
                "VODAFONE",
                meter.voucher,
                "10",
            )
            .unwrap();
            let meter_number = meter.meter_number;
            handles.push(tokio::spawn(async move {
                (meter_number, client.make_payment(&params).await)
            }));
        }
    }

    for handle in handles {
        let (meter_number, result) = handle.await.expect("task panicked");
        let report = result.unwrap_or_else(|e| panic!("payment for {} failed: {}", meter_number, e));
        assert_eq!(report.balance.body, balance_body(meter_number));
        assert_eq!(report.payment_body, format!("paid {}", meter_number));
    }

    // Every register call carried one of the two verify bodies, never a mix
    let requests = server.received_requests().await.expect("recording enabled");
    let registers: Vec<_> = requests
        .iter()
        .filter(|request| request.url.path() == REGISTER_PATH)
        .collect();
    assert_eq!(registers.len() as u64, ROUNDS * 2);
    for meter in &METERS {
        let verify = verify_body(meter.account_number, meter.meter_number);
        let count = registers
            .iter()
            .filter(|request| request.body == verify.as_bytes())
            .count() as u64;
        assert_eq!(count, ROUNDS, "register calls for {}", meter.meter_number);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_balance_lookups_return_their_own_meter() {
    let server = MockServer::start().await;
    mount_token(&server, 2).await;
    mount_meter_chain(&server, "ACC-AAA", "P-ALPHA").await;
    mount_meter_chain(&server, "ACC-BBB", "P-BRAVO").await;

    let client = orchestrator(&server);
    let alpha = RequestParams::for_balance("P-ALPHA").unwrap();
    let bravo = RequestParams::for_balance("P-BRAVO").unwrap();

    let (alpha_report, bravo_report) =
        tokio::join!(client.get_balance(&alpha), client.get_balance(&bravo));

    assert_eq!(alpha_report.unwrap().body, balance_body("P-ALPHA"));
    assert_eq!(bravo_report.unwrap().body, balance_body("P-BRAVO"));
}
