//! Size handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use shopkeeper_core::{SizeId, StoreId, fields};

use super::ensure_store_owner;
use crate::db::{RepositoryError, SizeRepository};
use crate::error::ApiError;
use crate::middleware::RequireUser;
use crate::models::Size;
use crate::state::AppState;
use crate::validate::validate_body;

const DELETE_HINT: &str = "Make sure you removed all products using this size first.";

/// Build the sizes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/{store_id}/sizes", get(list_sizes).post(create_size))
        .route(
            "/api/{store_id}/sizes/{size_id}",
            get(get_size).patch(update_size).delete(delete_size),
        )
}

#[derive(Debug, Deserialize)]
struct SizeBody {
    name: String,
    value: String,
}

/// List a store's sizes (public read).
async fn list_sizes(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Size>>, ApiError> {
    let sizes = SizeRepository::new(state.pool())
        .list_by_store(&store_id)
        .await?;
    Ok(Json(sizes))
}

/// Fetch one size (public read).
async fn get_size(
    State(state): State<AppState>,
    Path((_store_id, size_id)): Path<(StoreId, SizeId)>,
) -> Result<Json<Size>, ApiError> {
    let size = SizeRepository::new(state.pool())
        .get_by_id(&size_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(size))
}

/// Create a size.
async fn create_size(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Size>, ApiError> {
    validate_body(&body, fields::SIZE_FIELDS)?;
    let body: SizeBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let size = SizeRepository::new(state.pool())
        .create(&store_id, &body.name, &body.value)
        .await?;
    Ok(Json(size))
}

/// Replace a size's name and value.
async fn update_size(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Size>, ApiError> {
    validate_body(&body, fields::SIZE_FIELDS)?;
    let body: SizeBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let size = SizeRepository::new(state.pool())
        .update(&size_id, &store_id, &body.name, &body.value)
        .await?;
    Ok(Json(size))
}

/// Delete a size.
async fn delete_size(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_store_owner(state.pool(), &store_id, &user).await?;

    SizeRepository::new(state.pool())
        .delete(&size_id, &store_id)
        .await
        .map_err(|err| match err {
            RepositoryError::Conflict(_) => ApiError::Conflict(DELETE_HINT.to_string()),
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({"id": size_id})))
}
