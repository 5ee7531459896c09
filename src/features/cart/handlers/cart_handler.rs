use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::cart::dtos::{
    cart_from_items, CartTotalsRequestDto, CartTotalsResponseDto, OrderTotalsDto,
};
use crate::features::cart::services::compute_totals;
use crate::features::freight::dtos::QuoteResponseDto;
use crate::features::freight::services::FreightService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::normalize_country_code;

/// Compute order totals for a cart
///
/// With a shipping selection, shipping is priced from the matching checkout
/// option; otherwise the flat rate applies. Either way shipping is free once
/// the subtotal reaches the free-shipping threshold.
#[utoipa::path(
    post,
    path = "/api/cart/totals",
    request_body = CartTotalsRequestDto,
    responses(
        (status = 200, description = "Order totals", body = ApiResponse<CartTotalsResponseDto>),
        (status = 400, description = "Invalid cart or shipping selection")
    ),
    tag = "cart"
)]
pub async fn calculate_totals(
    State(service): State<Arc<FreightService>>,
    AppJson(dto): AppJson<CartTotalsRequestDto>,
) -> Result<Json<ApiResponse<CartTotalsResponseDto>>> {
    dto.validate()?;

    let cart = cart_from_items(dto.items)?;
    let store = service.store();

    let quote = match dto.shipping {
        Some(selection) => {
            let destination = normalize_country_code(&selection.destination_country);
            let option = service
                .select_option(&cart, &destination, selection.method)
                .await?;
            Some(option.quote)
        }
        None => None,
    };

    let totals = compute_totals(cart.lines(), &store.pricing(), quote.as_ref())?;

    let response = CartTotalsResponseDto {
        totals: OrderTotalsDto::from_totals(&totals, &store.currency),
        item_count: cart.item_count(),
        shipping_quote: quote
            .as_ref()
            .map(|q| QuoteResponseDto::from_quote(q, &store.currency)),
    };
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}
