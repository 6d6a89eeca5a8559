use serde::{Deserialize, Serialize};

use crate::error::{EcgError, Result};

/// Billing type the verify endpoint expects for prepaid meters
pub const PREPAID_BILLING_TYPE: u8 = 1;

/// Body sent to `metermanagement/verify`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyMeterRequest {
    pub meter_number: String,
    pub billing_type: u8,
    pub account_number: String,
}

impl VerifyMeterRequest {
    pub fn prepaid(meter_number: &str) -> Self {
        Self {
            meter_number: meter_number.to_string(),
            billing_type: PREPAID_BILLING_TYPE,
            account_number: String::new(),
        }
    }
}

/// Meter metadata returned by a successful verification
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MeterRecord {
    pub token: Option<String>,
    pub account_number: String,
    pub meter_number: String,
    pub name: String,
    pub address: String,
    pub meter_id: String,
}

impl MeterRecord {
    /// Balance and payment calls are addressed by account and meter number,
    /// so a record without them cannot be used.
    pub fn ensure_complete(self, body: &str) -> Result<Self> {
        let missing = if self.account_number.trim().is_empty() {
            Some("account number")
        } else if self.meter_number.trim().is_empty() {
            Some("meter number")
        } else {
            None
        };

        match missing {
            Some(missing) => Err(EcgError::IncompleteMeterRecord {
                missing,
                body: body.to_string(),
            }),
            None => Ok(self),
        }
    }
}
