//! Field-constraint metadata handlers.
//!
//! Exposes the same per-entity constraint tables the server validates with,
//! so form layers can render matching client-side checks without duplicating
//! the rules.

use axum::{Json, Router, extract::Path, routing::get};

use shopkeeper_core::{FieldSpec, fields};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the metadata router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/meta/{entity}/fields", get(entity_fields))
}

/// Fetch the field-constraint table for an entity.
///
/// # Errors
///
/// Returns 404 for entities without a constraint table.
async fn entity_fields(
    Path(entity): Path<String>,
) -> Result<Json<&'static [FieldSpec]>, ApiError> {
    fields::for_entity(&entity).map(Json).ok_or(ApiError::NotFound)
}
