use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::balance::BalanceReport;
use super::meter::MeterRecord;
use super::params::PaymentDetails;

/// Body sent to `prepaid/makepayment`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentRequest {
    pub meter_id: String,
    pub account_number: String,
    pub meter_number: String,
    pub voucher_number: String,
    pub mobile_number: String,
    /// Serialized as a JSON number with the exact digits entered
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub network: String,
}

impl PaymentRequest {
    pub fn new(meter: &MeterRecord, details: &PaymentDetails) -> Self {
        Self {
            meter_id: meter.meter_id.clone(),
            account_number: meter.account_number.clone(),
            meter_number: meter.meter_number.clone(),
            voucher_number: details.voucher().to_string(),
            mobile_number: details.mobile_number().to_string(),
            amount: details.amount(),
            network: details.network().to_string(),
        }
    }
}

/// Result of a top-up: the balance fetched beforehand plus the payment response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReport {
    pub balance: BalanceReport,
    pub payment_body: String,
    pub submitted_at: DateTime<Utc>,
}

impl PaymentReport {
    pub fn new(balance: BalanceReport, payment_body: String) -> Self {
        Self {
            balance,
            payment_body,
            submitted_at: Utc::now(),
        }
    }

    /// Balance body, a newline, then the payment body
    pub fn combined_text(&self) -> String {
        format!("{}\n{}", self.balance.body, self.payment_body)
    }
}
