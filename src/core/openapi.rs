use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::cart::{dtos as cart_dtos, handlers as cart_handlers};
use crate::features::checkout::{dtos as checkout_dtos, handlers as checkout_handlers};
use crate::features::couriers::{
    dtos as courier_dtos, handlers as courier_handlers, models as courier_models,
};
use crate::features::freight::{
    dtos as freight_dtos, handlers as freight_handlers, models as freight_models,
};
use crate::features::payments::models as payment_models;
use crate::features::shipments::{
    dtos as shipment_dtos, handlers as shipment_handlers, models as shipment_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Freight (public)
        freight_handlers::freight_handler::get_zone,
        freight_handlers::freight_handler::create_quote,
        freight_handlers::freight_handler::list_shipping_options,
        // Freight rates (admin)
        freight_handlers::rate_admin_handler::list_rates,
        freight_handlers::rate_admin_handler::get_rate,
        freight_handlers::rate_admin_handler::update_rate,
        freight_handlers::rate_admin_handler::reload_rates,
        freight_handlers::rate_admin_handler::export_rates,
        // Couriers
        courier_handlers::courier_handler::compare_courier_quotes,
        courier_handlers::courier_handler::list_couriers,
        courier_handlers::courier_handler::get_courier,
        courier_handlers::courier_handler::create_courier,
        courier_handlers::courier_handler::update_courier,
        courier_handlers::courier_handler::delete_courier,
        // Shipments
        shipment_handlers::shipment_handler::track_shipment,
        shipment_handlers::shipment_handler::list_shipments,
        shipment_handlers::shipment_handler::create_shipment,
        shipment_handlers::shipment_handler::update_shipment_status,
        // Cart
        cart_handlers::cart_handler::calculate_totals,
        // Checkout
        checkout_handlers::checkout_handler::checkout,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Freight
            freight_models::ShippingMethod,
            freight_dtos::ZoneResponseDto,
            freight_dtos::QuoteRequestDto,
            freight_dtos::QuoteResponseDto,
            freight_dtos::ShippingOptionDto,
            freight_dtos::ShippingOptionsRequestDto,
            freight_dtos::ShippingOptionsResponseDto,
            freight_dtos::DeliveryTimesDto,
            freight_dtos::RateEntryDto,
            freight_dtos::RateResponseDto,
            freight_dtos::UpdateRateDto,
            freight_dtos::UpdateRateResponseDto,
            freight_dtos::RateReloadResponseDto,
            freight_dtos::RateExportDto,
            // Couriers
            courier_models::CourierStatus,
            courier_dtos::CourierRateInputDto,
            courier_dtos::CourierRequestDto,
            courier_dtos::CourierRateDto,
            courier_dtos::CourierResponseDto,
            courier_dtos::CourierQuoteRequestDto,
            courier_dtos::CourierQuoteDto,
            courier_dtos::CourierQuotesResponseDto,
            // Shipments
            shipment_models::ShipmentStatus,
            shipment_dtos::CreateShipmentDto,
            shipment_dtos::UpdateShipmentStatusDto,
            shipment_dtos::TrackingEventDto,
            shipment_dtos::ShipmentResponseDto,
            shipment_dtos::ShipmentCreatedDto,
            // Cart
            cart_dtos::CartItemDto,
            cart_dtos::ShippingSelectionDto,
            cart_dtos::CartTotalsRequestDto,
            cart_dtos::OrderTotalsDto,
            cart_dtos::CartTotalsResponseDto,
            // Payments
            payment_models::PaymentMethod,
            payment_models::CardDetails,
            payment_models::CardBrand,
            payment_models::PaymentStatus,
            // Checkout
            checkout_dtos::ShippingAddressDto,
            checkout_dtos::CheckoutRequestDto,
            checkout_dtos::PaymentReceiptDto,
            checkout_dtos::CheckoutResponseDto,
            ApiResponse<freight_dtos::QuoteResponseDto>,
            ApiResponse<freight_dtos::RateResponseDto>,
            ApiResponse<Vec<freight_dtos::RateResponseDto>>,
            ApiResponse<checkout_dtos::CheckoutResponseDto>,
            ApiResponse<courier_dtos::CourierResponseDto>,
            ApiResponse<Vec<courier_dtos::CourierResponseDto>>,
            ApiResponse<courier_dtos::CourierQuotesResponseDto>,
            ApiResponse<shipment_dtos::ShipmentResponseDto>,
            ApiResponse<Vec<shipment_dtos::ShipmentResponseDto>>,
            ApiResponse<shipment_dtos::ShipmentCreatedDto>,
        )
    ),
    tags(
        (name = "freight", description = "Shipping zones, quotes and checkout shipping options (public)"),
        (name = "freight-admin", description = "Freight rate table and courier management (admin only)"),
        (name = "shipments", description = "Shipment booking and tracking"),
        (name = "cart", description = "Order totals for a cart (public)"),
        (name = "checkout", description = "Order placement and payment (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "GlobalMart API",
        version = "0.1.0",
        description = "API documentation for the GlobalMart storefront backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
