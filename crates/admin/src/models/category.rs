//! Category domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopkeeper_core::{BillboardId, CategoryId, StoreId};

use super::Billboard;

/// A product category, fronted by one billboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Owning store.
    pub store_id: StoreId,
    /// Billboard shown for this category.
    pub billboard_id: BillboardId,
    /// Display name.
    pub name: String,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A category with its billboard included (detail fetches).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    /// The referenced billboard.
    pub billboard: Billboard,
}
