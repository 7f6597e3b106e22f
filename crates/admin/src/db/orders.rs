//! Order repository (read-only; orders are created by the storefront
//! checkout, which lives outside this service).

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use shopkeeper_core::{OrderId, StoreId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

use chrono::{DateTime, Utc};

/// Internal row type for order queries (items attached separately).
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    store_id: StoreId,
    is_paid: bool,
    phone: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, order_items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            store_id: self.store_id,
            is_paid: self.is_paid,
            phone: self.phone,
            address: self.address,
            order_items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the orders of a store, newest first, optionally filtered by the
    /// paid flag, with line items included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_by_store(
        &self,
        store_id: &StoreId,
        paid: Option<bool>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut query = sqlx::QueryBuilder::new(
            "SELECT id, store_id, is_paid, phone, address, created_at, updated_at \
             FROM orders WHERE store_id = ",
        );
        query.push_bind(store_id);
        if let Some(paid) = paid {
            query.push(" AND is_paid = ").push_bind(paid);
        }
        query.push(" ORDER BY created_at DESC");

        let rows: Vec<OrderRow> = query.build_query_as().fetch_all(self.pool).await?;

        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT oi.id, oi.order_id, oi.product_id \
             FROM order_items oi \
             JOIN orders o ON o.id = oi.order_id \
             WHERE o.store_id = ?",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(item);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect())
    }

    /// Count of open (unpaid) sales for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn open_sales_count(&self, store_id: &StoreId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders WHERE store_id = ? AND is_paid = FALSE",
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Total revenue across paid orders, summed from the ordered products'
    /// prices.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a stored price does not
    /// parse.
    pub async fn paid_revenue(&self, store_id: &StoreId) -> Result<Decimal, RepositoryError> {
        let prices: Vec<(String,)> = sqlx::query_as(
            "SELECT p.price \
             FROM order_items oi \
             JOIN orders o ON o.id = oi.order_id \
             JOIN products p ON p.id = oi.product_id \
             WHERE o.store_id = ? AND o.is_paid = TRUE",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        let mut total = Decimal::ZERO;
        for (price,) in prices {
            total += Decimal::from_str(&price).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
            })?;
        }

        Ok(total)
    }
}
