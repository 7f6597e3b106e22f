//! Product handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use shopkeeper_core::{CategoryId, ColorId, ProductId, SizeId, StoreId, fields};

use super::ensure_store_owner;
use crate::db::products::ProductFilter;
use crate::db::{ProductRepository, RepositoryError};
use crate::error::ApiError;
use crate::middleware::RequireUser;
use crate::models::{ImageRef, NewProduct, Product, ProductDetail};
use crate::state::AppState;
use crate::validate::{parse_decimal, validate_body};

const DELETE_HINT: &str = "Make sure you removed all orders using this product first.";

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/{store_id}/products",
            get(list_products).post(create_product),
        )
        .route(
            "/api/{store_id}/products/{product_id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductBody {
    name: String,
    /// Decimal as JSON number or string; validated before conversion.
    price: serde_json::Value,
    category_id: CategoryId,
    size_id: SizeId,
    color_id: ColorId,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    is_archived: bool,
    images: Vec<ImageRef>,
}

impl ProductBody {
    fn into_new_product(self) -> Result<NewProduct, ApiError> {
        let price = parse_decimal(&self.price).ok_or(ApiError::MissingField("Price"))?;

        Ok(NewProduct {
            name: self.name,
            price,
            category_id: self.category_id,
            size_id: self.size_id,
            color_id: self.color_id,
            is_featured: self.is_featured,
            is_archived: self.is_archived,
            image_urls: self.images.into_iter().map(|image| image.url).collect(),
        })
    }
}

/// Storefront-facing list filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductListQuery {
    category_id: Option<CategoryId>,
    size_id: Option<SizeId>,
    color_id: Option<ColorId>,
    is_featured: Option<bool>,
}

impl From<ProductListQuery> for ProductFilter {
    fn from(query: ProductListQuery) -> Self {
        Self {
            category_id: query.category_id,
            size_id: query.size_id,
            color_id: query.color_id,
            is_featured: query.is_featured,
        }
    }
}

/// List a store's products with relations included (public read).
///
/// Archived products are excluded; optional filters narrow by category,
/// size, color, and the featured flag.
async fn list_products(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductDetail>>, ApiError> {
    let products = ProductRepository::new(state.pool())
        .list_by_store(&store_id, &query.into())
        .await?;
    Ok(Json(products))
}

/// Fetch one product with images and relations included (public read).
async fn get_product(
    State(state): State<AppState>,
    Path((_store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<Json<ProductDetail>, ApiError> {
    let product = ProductRepository::new(state.pool())
        .get_detail(&product_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(product))
}

/// Create a product with its image collection.
async fn create_product(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(store_id): Path<StoreId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Product>, ApiError> {
    validate_body(&body, fields::PRODUCT_FIELDS)?;
    let body: ProductBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let data = body.into_new_product()?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let product = ProductRepository::new(state.pool())
        .create(&store_id, &data)
        .await?;
    Ok(Json(product))
}

/// Replace a product's fields and swap its image collection atomically.
async fn update_product(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Product>, ApiError> {
    validate_body(&body, fields::PRODUCT_FIELDS)?;
    let body: ProductBody =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let data = body.into_new_product()?;

    ensure_store_owner(state.pool(), &store_id, &user).await?;

    let product = ProductRepository::new(state.pool())
        .update(&product_id, &store_id, &data)
        .await?;
    Ok(Json(product))
}

/// Delete a product; its images go with it.
async fn delete_product(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_store_owner(state.pool(), &store_id, &user).await?;

    ProductRepository::new(state.pool())
        .delete(&product_id, &store_id)
        .await
        .map_err(|err| match err {
            RepositoryError::Conflict(_) => ApiError::Conflict(DELETE_HINT.to_string()),
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({"id": product_id})))
}
