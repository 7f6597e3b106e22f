//! Dashboard overview handler.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;

use shopkeeper_core::StoreId;

use super::ensure_store_owner;
use crate::db::{OrderRepository, ProductRepository};
use crate::error::ApiError;
use crate::middleware::RequireUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/{store_id}/overview", get(get_overview))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Overview {
    /// Orders not yet paid.
    sales_count: i64,
    /// Sum of line item prices across paid orders.
    total_revenue: Decimal,
    /// Non-archived products in the catalog.
    stock_count: i64,
}

async fn get_overview(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Overview>, ApiError> {
    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let orders = OrderRepository::new(state.pool());
    let products = ProductRepository::new(state.pool());

    let overview = Overview {
        sales_count: orders.open_sales_count(&store_id).await?,
        total_revenue: orders.paid_revenue(&store_id).await?,
        stock_count: products.stock_count(&store_id).await?,
    };
    Ok(Json(overview))
}
