//! Size domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopkeeper_core::{SizeId, StoreId};

/// A product size option (e.g., name "Small", value "S").
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// Unique size ID.
    pub id: SizeId,
    /// Owning store.
    pub store_id: StoreId,
    /// Display name.
    pub name: String,
    /// Value string rendered on the storefront.
    pub value: String,
    /// When the size was created.
    pub created_at: DateTime<Utc>,
    /// When the size was last updated.
    pub updated_at: DateTime<Utc>,
}
