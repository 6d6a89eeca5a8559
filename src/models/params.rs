use rust_decimal::Decimal;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::error::{EcgError, Result};

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn positive_amount(amount: &Decimal) -> std::result::Result<(), ValidationError> {
    if amount <= &Decimal::ZERO {
        return Err(ValidationError::new("amount_must_be_positive"));
    }
    Ok(())
}

/// Mobile-money details needed to top up a prepaid meter
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct PaymentDetails {
    #[validate(custom(function = "not_blank", message = "mobile number is required"))]
    mobile_number: String,
    #[validate(custom(function = "not_blank", message = "network is required"))]
    network: String,
    #[validate(custom(function = "not_blank", message = "voucher is required"))]
    voucher: String,
    #[validate(custom(function = "positive_amount", message = "amount must be positive"))]
    amount: Decimal,
}

impl PaymentDetails {
    pub fn mobile_number(&self) -> &str {
        &self.mobile_number
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn voucher(&self) -> &str {
        &self.voucher
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Per-invocation inputs. Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct RequestParams {
    #[validate(custom(function = "not_blank", message = "meter number is required"))]
    meter_number: String,
    payment: Option<PaymentDetails>,
}

impl RequestParams {
    /// Parameters for a balance lookup
    pub fn for_balance(meter_number: impl Into<String>) -> Result<Self> {
        let params = Self {
            meter_number: meter_number.into(),
            payment: None,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters for a top-up. `amount` is the decimal amount as entered.
    pub fn for_payment(
        meter_number: impl Into<String>,
        mobile_number: impl Into<String>,
        network: impl Into<String>,
        voucher: impl Into<String>,
        amount: &str,
    ) -> Result<Self> {
        let amount = Decimal::from_str(amount.trim())
            .map_err(|e| EcgError::Validation(format!("invalid amount '{}': {}", amount, e)))?;
        let details = PaymentDetails {
            mobile_number: mobile_number.into(),
            network: network.into(),
            voucher: voucher.into(),
            amount,
        };
        details.validate()?;

        let params = Self {
            meter_number: meter_number.into(),
            payment: Some(details),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn meter_number(&self) -> &str {
        &self.meter_number
    }

    pub fn payment(&self) -> Option<&PaymentDetails> {
        self.payment.as_ref()
    }

    /// Payment details, or a validation error for balance-only parameters
    pub fn require_payment(&self) -> Result<&PaymentDetails> {
        self.payment.as_ref().ok_or_else(|| {
            EcgError::Validation("payment details are required to make a payment".to_string())
        })
    }
}
