use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::validate_card;
use crate::features::payments::models::{PaymentError, PaymentMethod, PaymentStatus, Receipt};

/// Capability to take payment for an order
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(
        &self,
        amount: Decimal,
        currency: &str,
        method: &PaymentMethod,
    ) -> Result<Receipt, PaymentError>;
}

/// Card number the simulated gateway always declines
pub const DECLINED_TEST_CARD: &str = "4000000000000002";

/// In-process gateway for development and tests.
///
/// Valid cards are captured immediately, except the declined test card. Bank
/// transfers and cash on delivery are accepted as pending.
#[derive(Debug, Default, Clone)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(
        &self,
        amount: Decimal,
        currency: &str,
        method: &PaymentMethod,
    ) -> Result<Receipt, PaymentError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount);
        }

        let now = Utc::now();
        let stamp = now.timestamp_millis();

        let (reference, status, card_brand, card_last4) = match method {
            PaymentMethod::Card(card) => {
                let (digits, brand) = validate_card(card, now)?;
                if digits == DECLINED_TEST_CARD {
                    tracing::warn!("Simulated gateway declined the test card");
                    return Err(PaymentError::Declined("Card declined by issuer".to_string()));
                }
                let last4 = digits[digits.len() - 4..].to_string();
                (
                    format!("CARD-{}", stamp),
                    PaymentStatus::Paid,
                    Some(brand),
                    Some(last4),
                )
            }
            PaymentMethod::BankTransfer => {
                (format!("BT-{}", stamp), PaymentStatus::Pending, None, None)
            }
            PaymentMethod::CashOnDelivery => {
                (format!("COD-{}", stamp), PaymentStatus::Pending, None, None)
            }
        };

        tracing::info!(
            "Simulated {} payment {} for {} {}",
            method.as_str(),
            reference,
            currency,
            amount
        );

        Ok(Receipt {
            reference,
            method: method.as_str(),
            status,
            amount,
            currency: currency.to_string(),
            card_brand,
            card_last4,
            processed_at: now,
        })
    }
}
