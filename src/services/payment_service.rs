use reqwest::{Method, Url};
use tracing::{info, instrument};

use super::http_executor::{endpoint_url, ApiRequest, HttpExecutor};
use crate::error::{EcgError, Result, Step};
use crate::models::{AccessToken, MeterRecord, PaymentDetails, PaymentRequest};

/// Submits prepaid top-ups
#[derive(Clone, Debug)]
pub struct PaymentService {
    executor: HttpExecutor,
    api_base: Url,
}

impl PaymentService {
    pub fn new(executor: HttpExecutor, api_base: Url) -> Self {
        Self { executor, api_base }
    }

    #[instrument(skip_all, fields(meter_number = %meter.meter_number, network = %details.network()))]
    pub async fn submit(
        &self,
        token: &AccessToken,
        meter: &MeterRecord,
        details: &PaymentDetails,
    ) -> Result<String> {
        let url = endpoint_url(&self.api_base, &["prepaid", "makepayment"])?;
        let payload = serde_json::to_string(&PaymentRequest::new(meter, details)).map_err(|e| {
            EcgError::RequestConstruction {
                step: Step::Payment,
                message: e.to_string(),
            }
        })?;

        let request = ApiRequest::new(Method::POST, url)
            .authenticated(Step::Payment, token)?
            .json_body(payload);

        let body = self
            .executor
            .execute(Step::Payment, request)
            .await?
            .into_success(Step::Payment)?;

        info!(
            "Payment of {} submitted for meter {}",
            details.amount(),
            meter.meter_number
        );
        Ok(body)
    }
}
