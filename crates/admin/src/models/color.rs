//! Color domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopkeeper_core::{ColorId, StoreId};

/// A product color option (e.g., name "Crimson", value "#dc143c").
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    /// Unique color ID.
    pub id: ColorId,
    /// Owning store.
    pub store_id: StoreId,
    /// Display name.
    pub name: String,
    /// Value string, typically a hex code.
    pub value: String,
    /// When the color was created.
    pub created_at: DateTime<Utc>,
    /// When the color was last updated.
    pub updated_at: DateTime<Utc>,
}
