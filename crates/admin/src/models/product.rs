//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopkeeper_core::{CategoryId, ColorId, ImageId, ProductId, SizeId, StoreId};

use super::{Category, Color, Size};

/// A product with its ordered image collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Owning store.
    pub store_id: StoreId,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Size option.
    pub size_id: SizeId,
    /// Color option.
    pub color_id: ColorId,
    /// Display name.
    pub name: String,
    /// Unit price; serialized as a decimal string (e.g., "19.99").
    pub price: Decimal,
    /// Shown on the storefront landing page.
    pub is_featured: bool,
    /// Hidden from storefront listings.
    pub is_archived: bool,
    /// Image collection, in submission order.
    pub images: Vec<Image>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One hosted image belonging to a product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Unique image ID.
    pub id: ImageId,
    /// Owning product.
    pub product_id: ProductId,
    /// URL of the hosted image.
    pub url: String,
    /// Position within the product's collection.
    #[serde(skip)]
    pub position: i64,
    /// When the image record was created.
    pub created_at: DateTime<Utc>,
    /// When the image record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A product with its relations included (detail and list fetches).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    /// The referenced category.
    pub category: Category,
    /// The referenced size.
    pub size: Size,
    /// The referenced color.
    pub color: Color,
}

/// Validated field set for creating or replacing a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub color_id: ColorId,
    pub is_featured: bool,
    pub is_archived: bool,
    /// Image URLs, in display order.
    pub image_urls: Vec<String>,
}

/// Wire shape of one entry in a product body's `images` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}
