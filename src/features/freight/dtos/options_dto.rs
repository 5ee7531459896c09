use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::ShippingOptionDto;
use crate::features::cart::dtos::CartItemDto;

/// Request DTO for checkout shipping options
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOptionsRequestDto {
    #[validate(length(min = 1, message = "destinationCountry is required"))]
    pub destination_country: String,
    #[validate(
        length(min = 1, message = "Cart must contain at least one item"),
        nested
    )]
    pub items: Vec<CartItemDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOptionsResponseDto {
    pub destination_country: String,
    pub zone: String,
    /// Estimated cart weight in kg
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub weight_kg: Decimal,
    pub options: Vec<ShippingOptionDto>,
}
