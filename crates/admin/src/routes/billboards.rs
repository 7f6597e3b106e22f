//! Billboard handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use shopkeeper_core::{BillboardId, StoreId, fields};

use super::ensure_store_owner;
use crate::db::{BillboardRepository, RepositoryError};
use crate::error::ApiError;
use crate::middleware::RequireUser;
use crate::models::Billboard;
use crate::state::AppState;
use crate::validate::validate_body;

const DELETE_HINT: &str = "Make sure you removed all categories using this billboard first.";

/// Build the billboards router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/{store_id}/billboards",
            get(list_billboards).post(create_billboard),
        )
        .route(
            "/api/{store_id}/billboards/{billboard_id}",
            get(get_billboard)
                .patch(update_billboard)
                .delete(delete_billboard),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BillboardBody {
    label: String,
    image_url: String,
}

/// List a store's billboards (public read).
async fn list_billboards(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Billboard>>, ApiError> {
    let billboards = BillboardRepository::new(state.pool())
        .list_by_store(&store_id)
        .await?;
    Ok(Json(billboards))
}

/// Fetch one billboard (public read).
async fn get_billboard(
    State(state): State<AppState>,
    Path((_store_id, billboard_id)): Path<(StoreId, BillboardId)>,
) -> Result<Json<Billboard>, ApiError> {
    let billboard = BillboardRepository::new(state.pool())
        .get_by_id(&billboard_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(billboard))
}

/// Create a billboard.
async fn create_billboard(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Billboard>, ApiError> {
    validate_body(&body, fields::BILLBOARD_FIELDS)?;
    let body: BillboardBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let billboard = BillboardRepository::new(state.pool())
        .create(&store_id, &body.label, &body.image_url)
        .await?;
    Ok(Json(billboard))
}

/// Replace a billboard's label and image URL.
async fn update_billboard(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Billboard>, ApiError> {
    validate_body(&body, fields::BILLBOARD_FIELDS)?;
    let body: BillboardBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let billboard = BillboardRepository::new(state.pool())
        .update(&billboard_id, &store_id, &body.label, &body.image_url)
        .await?;
    Ok(Json(billboard))
}

/// Delete a billboard.
async fn delete_billboard(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_store_owner(state.pool(), &store_id, &user).await?;

    BillboardRepository::new(state.pool())
        .delete(&billboard_id, &store_id)
        .await
        .map_err(|err| match err {
            RepositoryError::Conflict(_) => ApiError::Conflict(DELETE_HINT.to_string()),
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({"id": billboard_id})))
}
