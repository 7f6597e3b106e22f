//! Category handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use shopkeeper_core::{BillboardId, CategoryId, StoreId, fields};

use super::ensure_store_owner;
use crate::db::{CategoryRepository, RepositoryError};
use crate::error::ApiError;
use crate::middleware::RequireUser;
use crate::models::{Category, CategoryDetail};
use crate::state::AppState;
use crate::validate::validate_body;

const DELETE_HINT: &str = "Make sure you removed all products using this category first.";

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/{store_id}/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/{store_id}/categories/{category_id}",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryBody {
    name: String,
    billboard_id: BillboardId,
}

/// List a store's categories (public read).
async fn list_categories(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = CategoryRepository::new(state.pool())
        .list_by_store(&store_id)
        .await?;
    Ok(Json(categories))
}

/// Fetch one category with its billboard included (public read).
async fn get_category(
    State(state): State<AppState>,
    Path((_store_id, category_id)): Path<(StoreId, CategoryId)>,
) -> Result<Json<CategoryDetail>, ApiError> {
    let category = CategoryRepository::new(state.pool())
        .get_detail(&category_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(category))
}

/// Create a category.
async fn create_category(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Category>, ApiError> {
    validate_body(&body, fields::CATEGORY_FIELDS)?;
    let body: CategoryBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let category = CategoryRepository::new(state.pool())
        .create(&store_id, &body.billboard_id, &body.name)
        .await?;
    Ok(Json(category))
}

/// Replace a category's name and billboard reference.
async fn update_category(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Category>, ApiError> {
    validate_body(&body, fields::CATEGORY_FIELDS)?;
    let body: CategoryBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let category = CategoryRepository::new(state.pool())
        .update(&category_id, &store_id, &body.billboard_id, &body.name)
        .await?;
    Ok(Json(category))
}

/// Delete a category.
async fn delete_category(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_store_owner(state.pool(), &store_id, &user).await?;

    CategoryRepository::new(state.pool())
        .delete(&category_id, &store_id)
        .await
        .map_err(|err| match err {
            RepositoryError::Conflict(_) => ApiError::Conflict(DELETE_HINT.to_string()),
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({"id": category_id})))
}
