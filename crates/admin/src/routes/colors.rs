//! Color handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use shopkeeper_core::{ColorId, StoreId, fields};

use super::ensure_store_owner;
use crate::db::{ColorRepository, RepositoryError};
use crate::error::ApiError;
use crate::middleware::RequireUser;
use crate::models::Color;
use crate::state::AppState;
use crate::validate::validate_body;

const DELETE_HINT: &str = "Make sure you removed all products using this color first.";

/// Build the colors router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/{store_id}/colors", get(list_colors).post(create_color))
        .route(
            "/api/{store_id}/colors/{color_id}",
            get(get_color).patch(update_color).delete(delete_color),
        )
}

#[derive(Debug, Deserialize)]
struct ColorBody {
    name: String,
    value: String,
}

/// List a store's colors (public read).
async fn list_colors(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Color>>, ApiError> {
    let colors = ColorRepository::new(state.pool())
        .list_by_store(&store_id)
        .await?;
    Ok(Json(colors))
}

/// Fetch one color (public read).
async fn get_color(
    State(state): State<AppState>,
    Path((_store_id, color_id)): Path<(StoreId, ColorId)>,
) -> Result<Json<Color>, ApiError> {
    let color = ColorRepository::new(state.pool())
        .get_by_id(&color_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(color))
}

/// Create a color.
async fn create_color(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Color>, ApiError> {
    validate_body(&body, fields::COLOR_FIELDS)?;
    let body: ColorBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let color = ColorRepository::new(state.pool())
        .create(&store_id, &body.name, &body.value)
        .await?;
    Ok(Json(color))
}

/// Replace a color's name and value.
async fn update_color(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, color_id)): Path<(StoreId, ColorId)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Color>, ApiError> {
    validate_body(&body, fields::COLOR_FIELDS)?;
    let body: ColorBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let color = ColorRepository::new(state.pool())
        .update(&color_id, &store_id, &body.name, &body.value)
        .await?;
    Ok(Json(color))
}

/// Delete a color.
async fn delete_color(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, color_id)): Path<(StoreId, ColorId)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_store_owner(state.pool(), &store_id, &user).await?;

    ColorRepository::new(state.pool())
        .delete(&color_id, &store_id)
        .await
        .map_err(|err| match err {
            RepositoryError::Conflict(_) => ApiError::Conflict(DELETE_HINT.to_string()),
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({"id": color_id})))
}
