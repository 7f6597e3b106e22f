//! Store domain type.
//!
//! A store is a tenant: the root of ownership for every other entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopkeeper_core::{StoreId, UserId};

/// A store owned by exactly one user identity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Owner identity, as verified by the upstream auth provider.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
    /// When the store was last updated.
    pub updated_at: DateTime<Utc>,
}
