//! Order domain types.
//!
//! Orders are created by the storefront checkout, which is outside this
//! service; the admin API only lists them and counts them for the
//! dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopkeeper_core::{OrderId, OrderItemId, ProductId, StoreId};

/// A customer order with its line items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning store.
    pub store_id: StoreId,
    /// Whether payment completed.
    pub is_paid: bool,
    /// Customer phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Line items.
    pub order_items: Vec<OrderItem>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One line item of an order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique line item ID.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Ordered product.
    pub product_id: ProductId,
}
