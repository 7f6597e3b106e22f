//! Billboard domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopkeeper_core::{BillboardId, StoreId};

/// A promotional image + label, referenced by categories.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    /// Unique billboard ID.
    pub id: BillboardId,
    /// Owning store.
    pub store_id: StoreId,
    /// Display label.
    pub label: String,
    /// URL of the hosted billboard image.
    pub image_url: String,
    /// When the billboard was created.
    pub created_at: DateTime<Utc>,
    /// When the billboard was last updated.
    pub updated_at: DateTime<Utc>,
}
