use tracing::{error, info};
use uuid::Uuid;

use super::http_executor::HttpExecutor;
use super::meter_service::MeterService;
use super::payment_service::PaymentService;
use super::token_service::TokenService;
use crate::config::ClientConfig;
use crate::error::{EcgError, Result, Step};
use crate::models::{AccessToken, BalanceReport, MeterRecord, PaymentReport, RequestParams};
use crate::utils::decode_json;

/// State gathered while walking the chain for one top-level call. Never shared
/// between calls.
#[derive(Debug)]
struct CallContext {
    call_id: Uuid,
    token: AccessToken,
    meter: MeterRecord,
}

/// Runs the token, verify, register, balance (and payment) chain, stopping at
/// the first failing step.
#[derive(Clone, Debug)]
pub struct BillingOrchestrator {
    tokens: TokenService,
    meters: MeterService,
    payments: PaymentService,
}

impl BillingOrchestrator {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let executor = HttpExecutor::new(config.request_timeout)?;
        let api_base = config.endpoints.api_base.clone();

        Ok(Self {
            tokens: TokenService::new(
                executor.clone(),
                config.endpoints.token_url.clone(),
                config.credentials.clone(),
            ),
            meters: MeterService::new(executor.clone(), api_base.clone()),
            payments: PaymentService::new(executor, api_base),
        })
    }

    /// Token, verify and register. Everything after this needs a registered meter.
    async fn prepare(&self, call_id: Uuid, params: &RequestParams) -> Result<CallContext> {
        let token = self.tokens.acquire().await?;

        let verify_body = self.meters.verify(&token, params.meter_number()).await?;
        let meter = decode_json::<MeterRecord>(Step::Verify, &verify_body)?
            .ensure_complete(&verify_body)?;

        self.meters.register(&token, &verify_body).await?;

        Ok(CallContext {
            call_id,
            token,
            meter,
        })
    }

    pub async fn get_balance(&self, params: &RequestParams) -> Result<BalanceReport> {
        let call_id = Uuid::new_v4();
        info!(%call_id, "Fetching balance for meter {}", params.meter_number());

        let result = async {
            let ctx = self.prepare(call_id, params).await?;
            self.meters.fetch_balance(&ctx.token, &ctx.meter).await
        }
        .await;

        log_outcome(call_id, "get_balance", &result);
        result
    }

    pub async fn make_payment(&self, params: &RequestParams) -> Result<PaymentReport> {
        let call_id = Uuid::new_v4();
        let details = params.require_payment()?;
        info!(
            %call_id,
            "Paying {} to meter {} via {}",
            details.amount(),
            params.meter_number(),
            details.network()
        );

        let result = async {
            let ctx = self.prepare(call_id, params).await?;
            let balance = self.meters.fetch_balance(&ctx.token, &ctx.meter).await?;
            let payment_body = self.payments.submit(&ctx.token, &ctx.meter, details).await?;
            info!(call_id = %ctx.call_id, "Payment accepted for meter {}", ctx.meter.meter_number);
            Ok::<_, EcgError>(PaymentReport::new(balance, payment_body))
        }
        .await;

        log_outcome(call_id, "make_payment", &result);
        result
    }

    /// Plain-text form of [`get_balance`](Self::get_balance): the balance body
    /// on success, otherwise the legacy error text
    pub async fn get_balance_text(&self, params: &RequestParams) -> String {
        match self.get_balance(params).await {
            Ok(report) => report.body,
            Err(e) => e.legacy_text(),
        }
    }

    /// Plain-text form of [`make_payment`](Self::make_payment)
    pub async fn make_payment_text(&self, params: &RequestParams) -> String {
        match self.make_payment(params).await {
            Ok(report) => report.combined_text(),
            Err(e) => e.legacy_text(),
        }
    }
}

fn log_outcome<T>(call_id: Uuid, operation: &str, result: &std::result::Result<T, EcgError>) {
    if let Err(e) = result {
        error!(
            %call_id,
            kind = ?e.kind(),
            step = ?e.step(),
            "{} failed: {}",
            operation,
            e
        );
    }
}
