use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::cart::models::{Cart, CartError, CartLine, OrderTotals};
use crate::features::freight::dtos::QuoteResponseDto;
use crate::features::freight::models::ShippingMethod;
use crate::shared::money::{format_money, round_money};

/// A cart line as sent by the storefront
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    #[serde(alias = "id")]
    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,
    pub name: Option<String>,
    #[serde(alias = "price")]
    #[schema(value_type = f64, example = 49.9)]
    pub unit_price: Decimal,
    #[validate(range(min = 1, max = 10000, message = "quantity must be between 1 and 10000"))]
    pub quantity: u32,
    /// Per-item weight in kg; 0.5 kg is assumed when absent
    #[schema(value_type = Option<f64>)]
    pub weight_kg: Option<Decimal>,
}

impl From<CartItemDto> for CartLine {
    fn from(dto: CartItemDto) -> Self {
        Self {
            product_id: dto.product_id,
            name: dto.name,
            unit_price: dto.unit_price,
            quantity: dto.quantity,
            weight_kg: dto.weight_kg,
        }
    }
}

pub fn cart_from_items(items: Vec<CartItemDto>) -> Result<Cart, CartError> {
    Cart::from_lines(items.into_iter().map(CartLine::from))
}

/// Destination and method used to price shipping for a cart
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingSelectionDto {
    #[validate(length(min = 1, message = "destinationCountry is required"))]
    pub destination_country: String,
    #[serde(default)]
    pub method: ShippingMethod,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartTotalsRequestDto {
    #[validate(nested)]
    pub items: Vec<CartItemDto>,
    /// Without a selection the flat shipping rate applies
    #[validate(nested)]
    pub shipping: Option<ShippingSelectionDto>,
}

/// Order totals, rounded to cents
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotalsDto {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub currency: String,
    pub formatted_total: String,
}

impl OrderTotalsDto {
    pub fn from_totals(totals: &OrderTotals, currency: &str) -> Self {
        Self {
            subtotal: round_money(totals.subtotal),
            tax: round_money(totals.tax),
            shipping: round_money(totals.shipping),
            total: round_money(totals.total),
            currency: currency.to_string(),
            formatted_total: format_money(currency, totals.total),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartTotalsResponseDto {
    pub totals: OrderTotalsDto,
    pub item_count: u64,
    /// Quote used for shipping, when a selection was given
    pub shipping_quote: Option<QuoteResponseDto>,
}
