pub mod balance;
pub mod meter;
pub mod params;
pub mod payment;
pub mod token;

pub use balance::{BalanceReport, MeterBalance};
pub use meter::{MeterRecord, VerifyMeterRequest, PREPAID_BILLING_TYPE};
pub use params::{PaymentDetails, RequestParams};
pub use payment::{PaymentReport, PaymentRequest};
pub use token::{AccessToken, TokenResponse};
