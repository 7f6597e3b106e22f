//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                  - Health check
//!
//! # Stores (tenants)
//! GET  /api/stores                              - List caller's stores
//! POST /api/stores                              - Create store
//! GET  /api/stores/{storeId}                    - Fetch owned store
//! PATCH /api/stores/{storeId}                   - Rename store
//! DELETE /api/stores/{storeId}                  - Delete store
//!
//! # Catalog (per store)
//! GET|POST /api/{storeId}/billboards            (+ GET|PATCH|DELETE /{billboardId})
//! GET|POST /api/{storeId}/categories            (+ GET|PATCH|DELETE /{categoryId})
//! GET|POST /api/{storeId}/sizes                 (+ GET|PATCH|DELETE /{sizeId})
//! GET|POST /api/{storeId}/colors                (+ GET|PATCH|DELETE /{colorId})
//! GET|POST /api/{storeId}/products              (+ GET|PATCH|DELETE /{productId})
//!
//! # Orders & dashboard
//! GET  /api/{storeId}/orders                    - List orders (?paid= filter)
//! GET  /api/{storeId}/overview                  - Dashboard counts
//!
//! # Metadata
//! GET  /api/meta/{entity}/fields                - Field-constraint table
//! ```
//!
//! List and fetch GETs on catalog entities are public reads; every mutation
//! requires a verified identity (401 otherwise) and store ownership (403
//! otherwise), checked before any write.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shopkeeper_core::{StoreId, UserId};

use crate::db::StoreRepository;
use crate::error::ApiError;
use crate::state::AppState;

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod health;
pub mod meta;
pub mod orders;
pub mod overview;
pub mod products;
pub mod sizes;
pub mod stores;

/// Build the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(meta::router())
        .merge(stores::router())
        .merge(billboards::router())
        .merge(categories::router())
        .merge(sizes::router())
        .merge(colors::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(overview::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The ownership gate: confirm `user_id` owns `store_id` before a mutation.
///
/// Short-circuits with 403 `Unauthorized` when the store is missing or owned
/// by someone else, before any persistence call.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` on owner mismatch, or a database error.
pub(crate) async fn ensure_store_owner(
    pool: &SqlitePool,
    store_id: &StoreId,
    user_id: &UserId,
) -> Result<(), ApiError> {
    let owned = StoreRepository::new(pool)
        .is_owned_by(store_id, user_id)
        .await?;

    if owned {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}
