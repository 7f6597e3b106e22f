//! Store (tenant) handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use shopkeeper_core::{StoreId, fields};

use super::ensure_store_owner;
use crate::db::StoreRepository;
use crate::error::ApiError;
use crate::middleware::RequireUser;
use crate::models::Store;
use crate::state::AppState;
use crate::validate::validate_body;

const DELETE_HINT: &str = "Make sure you removed all products and categories first.";

/// Build the stores router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stores", get(list_stores).post(create_store))
        .route(
            "/api/stores/{store_id}",
            get(get_store).patch(update_store).delete(delete_store),
        )
}

#[derive(Debug, Deserialize)]
struct StoreBody {
    name: String,
}

/// List the caller's stores.
async fn list_stores(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Store>>, ApiError> {
    let stores = StoreRepository::new(state.pool())
        .list_for_user(&user)
        .await?;
    Ok(Json(stores))
}

/// Create a store owned by the caller.
async fn create_store(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Store>, ApiError> {
    validate_body(&body, fields::STORE_FIELDS)?;
    let body: StoreBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let store = StoreRepository::new(state.pool())
        .create(&user, &body.name)
        .await?;
    Ok(Json(store))
}

/// Fetch one of the caller's stores.
async fn get_store(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Store>, ApiError> {
    let store = StoreRepository::new(state.pool())
        .get_by_id(&store_id)
        .await?
        .filter(|store| store.user_id == user)
        .ok_or(ApiError::NotFound)?;
    Ok(Json(store))
}

/// Rename a store.
async fn update_store(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Store>, ApiError> {
    validate_body(&body, fields::STORE_FIELDS)?;
    let body: StoreBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let store = StoreRepository::new(state.pool())
        .update_name(&store_id, &user, &body.name)
        .await?;
    Ok(Json(store))
}

/// Delete a store.
async fn delete_store(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_store_owner(state.pool(), &store_id, &user).await?;

    StoreRepository::new(state.pool())
        .delete(&store_id, &user)
        .await
        .map_err(|err| match err {
            crate::db::RepositoryError::Conflict(_) => {
                ApiError::Conflict(DELETE_HINT.to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({"id": store_id})))
}
