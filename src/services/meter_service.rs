use reqwest::{Method, Url};
use tracing::{info, instrument};

use super::http_executor::{endpoint_url, ApiRequest, HttpExecutor};
use crate::error::{EcgError, Result, Step};
use crate::models::{AccessToken, BalanceReport, MeterRecord, VerifyMeterRequest};

/// Verify, register and balance calls against the meter management API
#[derive(Clone, Debug)]
pub struct MeterService {
    executor: HttpExecutor,
    api_base: Url,
}

impl MeterService {
    pub fn new(executor: HttpExecutor, api_base: Url) -> Self {
        Self { executor, api_base }
    }

    /// Verify a meter number. Returns the raw response, which is expected to
    /// be a meter record. The meter number format is left to the remote side.
    #[instrument(skip(self, token))]
    pub async fn verify(&self, token: &AccessToken, meter_number: &str) -> Result<String> {
        let url = endpoint_url(&self.api_base, &["metermanagement", "verify"])?;
        let payload = serde_json::to_string(&VerifyMeterRequest::prepaid(meter_number)).map_err(
            |e| EcgError::RequestConstruction {
                step: Step::Verify,
                message: e.to_string(),
            },
        )?;

        let request = ApiRequest::new(Method::POST, url)
            .authenticated(Step::Verify, token)?
            .json_body(payload);

        let body = self
            .executor
            .execute(Step::Verify, request)
            .await?
            .into_success(Step::Verify)?;

        info!("Meter {} verified", meter_number);
        Ok(body)
    }

    /// Register a verified meter by replaying the verify response body as-is
    #[instrument(skip(self, token, verify_body))]
    pub async fn register(&self, token: &AccessToken, verify_body: &str) -> Result<String> {
        let url = endpoint_url(&self.api_base, &["metermanagement", "addprepaidmeter"])?;
        let request = ApiRequest::new(Method::POST, url)
            .authenticated(Step::Register, token)?
            .json_body(verify_body.to_string());

        let body = self
            .executor
            .execute(Step::Register, request)
            .await?
            .into_success(Step::Register)?;

        info!("Prepaid meter registered");
        Ok(body)
    }

    #[instrument(skip(self, token, meter), fields(meter_number = %meter.meter_number))]
    pub async fn fetch_balance(
        &self,
        token: &AccessToken,
        meter: &MeterRecord,
    ) -> Result<BalanceReport> {
        let url = endpoint_url(
            &self.api_base,
            &[
                "Dashboard",
                "Get",
                meter.account_number.as_str(),
                meter.meter_number.as_str(),
            ],
        )?;
        let request = ApiRequest::new(Method::GET, url).authenticated(Step::Balance, token)?;

        let body = self
            .executor
            .execute(Step::Balance, request)
            .await?
            .into_success(Step::Balance)?;

        info!("Balance fetched for meter {}", meter.meter_number);
        Ok(BalanceReport::new(body))
    }
}
