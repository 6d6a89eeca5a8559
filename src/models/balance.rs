use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, Step};
use crate::utils::decode_json;

/// Consumption and balance snapshot served by the dashboard endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MeterBalance {
    pub last_topup_amount: f64,
    pub balance: f64,
    pub last_topup_date: u64,
    pub week_consumption: f64,
    pub highest_consumption_day: f64,
    pub maximum_consumption: f64,
    pub lowest_consumption_day: f64,
    pub minimum_consumption: f64,
    pub average_consumption: f64,
}

/// Result of a balance lookup. `body` is the dashboard response verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

impl BalanceReport {
    pub fn new(body: String) -> Self {
        Self {
            body,
            fetched_at: Utc::now(),
        }
    }

    pub fn snapshot(&self) -> Result<MeterBalance> {
        decode_json(Step::Balance, &self.body)
    }
}
