//! Order handlers. Orders are created by the checkout flow, so the
//! admin surface is read only.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use shopkeeper_core::StoreId;

use super::ensure_store_owner;
use crate::db::OrderRepository;
use crate::error::ApiError;
use crate::middleware::RequireUser;
use crate::models::Order;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/{store_id}/orders", get(list_orders))
}

#[derive(Debug, Default, Deserialize)]
struct OrderListQuery {
    paid: Option<bool>,
}

/// List a store's orders with their line items, newest first.
async fn list_orders(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let orders = OrderRepository::new(state.pool())
        .list_by_store(&store_id, query.paid)
        .await?;
    Ok(Json(orders))
}
