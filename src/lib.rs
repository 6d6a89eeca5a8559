//! Client for the ECG prepaid electricity billing API.
//!
//! Checking a balance takes four calls (token, verify, register, balance) and
//! paying takes five. [`BillingOrchestrator`] runs them in order, stops at the
//! first failure and reports which step failed through [`EcgError`].

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{ClientConfig, Credentials, Endpoints};
pub use error::{EcgError, ErrorKind, Result, Step};
pub use models::{BalanceReport, MeterBalance, MeterRecord, PaymentReport, RequestParams};
pub use services::BillingOrchestrator;
