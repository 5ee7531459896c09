use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::core::error::AppError;

/// How the customer pays for an order
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card(CardDetails),
    BankTransfer,
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card(_) => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }
}

#[derive(Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Card number; spaces and dashes are ignored
    #[schema(example = "4242 4242 4242 4242")]
    pub number: String,
    /// Expiry as MM/YY
    #[schema(example = "12/30")]
    pub expiry: String,
    pub cvc: String,
    pub holder_name: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: String = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        let last4 = &digits[digits.len().saturating_sub(4)..];
        f.debug_struct("CardDetails")
            .field("number", &format!("****{}", last4))
            .field("expiry", &self.expiry)
            .field("holder_name", &self.holder_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Funds captured
    Paid,
    /// Awaiting transfer or collection on delivery
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
        }
    }
}

/// Gateway confirmation for a charge
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub reference: String,
    pub method: &'static str,
    pub status: PaymentStatus,
    pub amount: Decimal,
    pub currency: String,
    pub card_brand: Option<CardBrand>,
    pub card_last4: Option<String>,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Payment amount must be greater than zero")]
    InvalidAmount,

    #[error("{0}")]
    InvalidCard(String),

    #[error("Payment declined: {0}")]
    Declined(String),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Declined(_) => AppError::PaymentFailed(err.to_string()),
            _ => AppError::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_deserializes_by_tag() {
        let card: PaymentMethod = serde_json::from_value(serde_json::json!({
            "type": "card",
            "number": "4242424242424242",
            "expiry": "12/30",
            "cvc": "123",
            "holderName": "Aisyah"
        }))
        .unwrap();
        assert_eq!(card.as_str(), "card");

        let cod: PaymentMethod =
            serde_json::from_value(serde_json::json!({ "type": "cash_on_delivery" })).unwrap();
        assert_eq!(cod.as_str(), "cash_on_delivery");
    }

    #[test]
    fn test_card_debug_masks_number() {
        let card = CardDetails {
            number: "4242 4242 4242 4242".to_string(),
            expiry: "12/30".to_string(),
            cvc: "123".to_string(),
            holder_name: "Aisyah".to_string(),
        };
        let debug = format!("{:?}", card);
        assert!(debug.contains("****4242"));
        assert!(!debug.contains("4242 4242"));
        assert!(!debug.contains("123"));
    }
}
