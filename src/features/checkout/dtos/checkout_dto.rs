use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::cart::dtos::{CartItemDto, OrderTotalsDto};
use crate::features::checkout::models::Order;
use crate::features::freight::dtos::ShippingOptionDto;
use crate::features::freight::models::{ShippingAddress, ShippingMethod};
use crate::features::payments::models::{CardBrand, PaymentMethod, PaymentStatus, Receipt};
use crate::shared::money::round_money;
use crate::shared::validation::normalize_country_code;

/// Shipping address as entered on the checkout form.
///
/// Missing fields deserialize as empty and are reported together by the
/// address check.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddressDto {
    #[schema(example = "MY")]
    pub country: String,
    pub state: String,
    pub city: String,
    pub postal_code: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
}

impl From<ShippingAddressDto> for ShippingAddress {
    fn from(dto: ShippingAddressDto) -> Self {
        Self {
            country: normalize_country_code(&dto.country),
            state: dto.state.trim().to_string(),
            city: dto.city.trim().to_string(),
            postal_code: dto.postal_code.trim().to_string(),
            address_line1: dto.address_line1.trim().to_string(),
            address_line2: dto
                .address_line2
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequestDto {
    #[validate(
        length(min = 1, message = "Cart must contain at least one item"),
        nested
    )]
    pub items: Vec<CartItemDto>,
    pub shipping_address: ShippingAddressDto,
    #[serde(default)]
    pub shipping_method: ShippingMethod,
    pub payment: PaymentMethod,
}

/// Payment confirmation returned with an order
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceiptDto {
    pub reference: String,
    pub method: String,
    pub status: PaymentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<CardBrand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    pub processed_at: DateTime<Utc>,
}

impl From<&Receipt> for PaymentReceiptDto {
    fn from(receipt: &Receipt) -> Self {
        Self {
            reference: receipt.reference.clone(),
            method: receipt.method.to_string(),
            status: receipt.status,
            amount: round_money(receipt.amount),
            currency: receipt.currency.clone(),
            card_brand: receipt.card_brand,
            card_last4: receipt.card_last4.clone(),
            processed_at: receipt.processed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponseDto {
    #[schema(example = "ORD-1767225600000-42")]
    pub order_number: String,
    pub totals: OrderTotalsDto,
    pub shipping: ShippingOptionDto,
    pub payment: PaymentReceiptDto,
    /// Whether the order reached the order sheet
    pub recorded: bool,
    pub created_at: DateTime<Utc>,
}

impl CheckoutResponseDto {
    pub fn from_order(order: &Order, currency: &str) -> Self {
        Self {
            order_number: order.order_number.clone(),
            totals: OrderTotalsDto::from_totals(&order.totals, currency),
            shipping: ShippingOptionDto::from(&order.shipping),
            payment: PaymentReceiptDto::from(&order.receipt),
            recorded: order.recorded,
            created_at: order.created_at,
        }
    }
}
