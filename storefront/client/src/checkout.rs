//! # Checkout
//!
//! Order summary and order placement from the current cart snapshot.
//!
//! - `shipping = 0` when `subtotal > 50`, otherwise `5.99` (exactly 50 still pays)
//! - `total = subtotal + shipping`
//! - Cash on delivery is the only payment method
//!
//! The totals are derived from the cached lines, never from a server total. If
//! the backend ever applies promotions or taxes the two can disagree.
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    cart::{CartItem, CartStore, subtotal, total_items},
    error::{Error, Result},
    models::{CreatedOrder, OrderItemRequest, OrderRequest, PaymentMethod},
};

pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(599, 0, 0, false, 2);
pub const MIN_ADDRESS_LEN: usize = 10;

pub fn shipping_for(subtotal: Decimal) -> Decimal {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    pub fn from_items(items: &[CartItem]) -> Self {
        let subtotal = subtotal(items);
        let shipping = shipping_for(subtotal);

        Self {
            item_count: total_items(items),
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
        }
    }
}

pub fn validate_shipping_address(address: &str) -> Result<()> {
    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(Error::Validation(
            "Please provide a complete shipping address".to_string(),
        ));
    }

    Ok(())
}

pub fn order_request(items: &[CartItem], shipping_address: &str) -> OrderRequest {
    OrderRequest {
        order_items: items
            .iter()
            .map(|item| OrderItemRequest {
                medicine_id: item.medicine_id.clone(),
                quantity: item.quantity,
            })
            .collect(),
        shipping_address: shipping_address.to_string(),
        payment_method: PaymentMethod::CashOnDelivery,
    }
}

#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<Vec<CreatedOrder>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: String,
    /// Where the storefront goes next: the new order's detail page.
    pub location: String,
}

pub struct Checkout {
    cart: Arc<CartStore>,
    orders: Arc<dyn OrderApi>,
}

impl Checkout {
    pub fn new(cart: Arc<CartStore>, orders: Arc<dyn OrderApi>) -> Self {
        Self { cart, orders }
    }

    pub fn summary(&self) -> OrderSummary {
        self.cart.summary()
    }

    pub async fn place_order(&self, shipping_address: &str) -> Result<PlacedOrder> {
        validate_shipping_address(shipping_address)?;

        let items = self.cart.items();
        if items.is_empty() {
            return Err(Error::Validation("Your cart is empty".to_string()));
        }

        let request = order_request(&items, shipping_address);
        let summary = OrderSummary::from_items(&items);
        info!(
            "Placing order for {} items, total {}",
            summary.item_count, summary.total
        );

        let created = self.orders.create_order(&request).await.inspect_err(|e| {
            warn!("Order placement failed: {e:?}");
        })?;

        let order_id = created
            .into_iter()
            .next()
            .map(|order| order.id)
            .unwrap_or_default();

        if let Err(e) = self.cart.clear_cart().await {
            warn!("Order {order_id} placed but the cart could not be cleared: {e}");
        }

        Ok(PlacedOrder {
            location: format!("/dashboard/orders/{order_id}"),
            order_id,
        })
    }
}
