// Billing API call steps and the orchestrator that chains them

pub mod http_executor;
pub mod meter_service;
pub mod orchestrator;
pub mod payment_service;
pub mod token_service;

pub use http_executor::{ApiRequest, HttpExecutor, RawResponse, RequestBody};
pub use meter_service::MeterService;
pub use orchestrator::BillingOrchestrator;
pub use payment_service::PaymentService;
pub use token_service::TokenService;
