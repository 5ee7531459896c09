use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::features::cart::models::{Cart, OrderTotals};
use crate::features::freight::models::{ShippingAddress, ShippingMethod, ShippingOption};
use crate::features::payments::models::{PaymentMethod, Receipt};
use crate::modules::sheets::{OrderRecord, OrderRecordLine};

/// Everything needed to place an order
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub cart: Cart,
    pub address: ShippingAddress,
    pub shipping_method: ShippingMethod,
    pub payment: PaymentMethod,
}

/// A placed and charged order
#[derive(Debug, Clone)]
pub struct Order {
    pub order_number: String,
    pub cart: Cart,
    pub address: ShippingAddress,
    pub totals: OrderTotals,
    pub shipping: ShippingOption,
    pub receipt: Receipt,
    /// Whether the order reached the order sheet
    pub recorded: bool,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn to_record(&self) -> OrderRecord {
        OrderRecord {
            order_number: self.order_number.clone(),
            items: self
                .cart
                .lines()
                .iter()
                .map(|line| OrderRecordLine {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            subtotal: self.totals.subtotal,
            tax: self.totals.tax,
            shipping: self.totals.shipping,
            total: self.totals.total,
            shipping_method: self.shipping.method.as_str().to_string(),
            destination_country: self.address.country.clone(),
            shipping_address: self.address.one_line(),
            payment_method: self.receipt.method.to_string(),
            payment_status: self.receipt.status.as_str().to_string(),
            payment_reference: self.receipt.reference.clone(),
            created_at: self.created_at,
        }
    }
}

/// Order number of the form `ORD-<unix millis>-<0..999>`
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().as_u128() % 1000;
    format!("ORD-{}-{}", now.timestamp_millis(), suffix)
}
