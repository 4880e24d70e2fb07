//! # Simulated Payment
//!
//! Checkout never talks to a real processor. The gateway validates the
//! payment form, waits a fixed delay, and always approves.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Simulated Charge                                     │
//! │                                                                         │
//! │  PaymentDetails ──► validate() ──► sleep(payment_delay) ──► Receipt    │
//! │        │                 │                                              │
//! │        │                 └── VALIDATION_ERROR (blank field, bad email) │
//! │        │                                                                │
//! │        └── card number is never stored; the receipt keeps last four    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use artvault_core::validation::{validate_email, validate_required};
use artvault_core::Money;

use crate::error::ApiError;
use crate::state::ConfigState;

/// The checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

impl PaymentDetails {
    /// Every field is required; the email must look like an address.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_required("card number", &self.card_number)?;
        validate_required("expiry date", &self.expiry_date)?;
        validate_required("cvv", &self.cvv)?;
        validate_required("cardholder name", &self.cardholder_name)?;
        validate_email(&self.email)?;
        validate_required("address", &self.address)?;
        validate_required("city", &self.city)?;
        validate_required("zip code", &self.zip_code)?;
        Ok(())
    }

    /// Last four digits of the card number.
    pub fn card_last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

/// Proof of an approved simulated charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// `sim_pay_<uuid>`
    pub reference: String,
    pub amount: Money,
    pub card_last_four: String,
    pub processed_at: DateTime<Utc>,
}

/// Approves every valid charge after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPaymentGateway {
    delay: Duration,
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration) -> Self {
        SimulatedPaymentGateway { delay }
    }

    pub fn from_config(config: &ConfigState) -> Self {
        Self::new(config.payment_delay())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Charges `amount` to the card in `details`.
    #[instrument(skip(self, details), fields(amount = %amount))]
    pub async fn charge(
        &self,
        amount: Money,
        details: &PaymentDetails,
    ) -> Result<PaymentReceipt, ApiError> {
        details.validate()?;

        if amount.is_negative() {
            return Err(ApiError::payment("Payment amount cannot be negative"));
        }

        info!(delay_ms = self.delay.as_millis() as u64, "Processing simulated payment");
        tokio::time::sleep(self.delay).await;

        let receipt = PaymentReceipt {
            reference: format!("sim_pay_{}", Uuid::new_v4()),
            amount,
            card_last_four: details.card_last_four(),
            processed_at: Utc::now(),
        };

        info!(reference = %receipt.reference, "Simulated payment approved");
        Ok(receipt)
    }
}

#[cfg(test)]
pub(crate) fn test_payment_details() -> PaymentDetails {
    PaymentDetails {
        card_number: "4242 4242 4242 4242".to_string(),
        expiry_date: "12/30".to_string(),
        cvv: "123".to_string(),
        cardholder_name: "Ada Buyer".to_string(),
        email: "ada@example.com".to_string(),
        address: "1 Gallery Row".to_string(),
        city: "Springfield".to_string(),
        zip_code: "12345".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_card_last_four() {
        let details = test_payment_details();
        assert_eq!(details.card_last_four(), "4242");

        let short = PaymentDetails {
            card_number: "12".to_string(),
            ..details
        };
        assert_eq!(short.card_last_four(), "12");
    }

    #[test]
    fn test_validate_requires_every_field() {
        assert!(test_payment_details().validate().is_ok());

        let missing_city = PaymentDetails {
            city: "  ".to_string(),
            ..test_payment_details()
        };
        assert_eq!(
            missing_city.validate().unwrap_err().code,
            ErrorCode::ValidationError
        );

        let bad_email = PaymentDetails {
            email: "not-an-email".to_string(),
            ..test_payment_details()
        };
        assert!(bad_email.validate().is_err());
    }

    #[tokio::test]
    async fn test_charge_approves() {
        let gateway = SimulatedPaymentGateway::new(Duration::ZERO);
        let receipt = gateway
            .charge(Money::from_cents(48_600), &test_payment_details())
            .await
            .unwrap();

        assert!(receipt.reference.starts_with("sim_pay_"));
        assert_eq!(receipt.amount, Money::from_cents(48_600));
        assert_eq!(receipt.card_last_four, "4242");
    }

    #[tokio::test]
    async fn test_charge_rejects_invalid_form() {
        let gateway = SimulatedPaymentGateway::new(Duration::ZERO);
        let err = gateway
            .charge(Money::from_cents(100), &PaymentDetails::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_from_config() {
        let config = ConfigState {
            payment_delay_ms: 5,
            ..ConfigState::default()
        };
        assert_eq!(
            SimulatedPaymentGateway::from_config(&config).delay(),
            Duration::from_millis(5)
        );
    }
}
