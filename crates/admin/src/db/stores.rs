//! Store repository.
//!
//! Also home of the ownership check every mutation route runs before
//! touching child entities.

use chrono::Utc;
use sqlx::SqlitePool;

use shopkeeper_core::{StoreId, UserId};

use super::RepositoryError;
use crate::models::Store;

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether `store_id` exists and is owned by `user_id`.
    ///
    /// Read-only; this is the ownership gate run ahead of every mutation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_owned_by(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM stores WHERE id = ? AND user_id = ?")
                .bind(store_id)
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.is_some())
    }

    /// Create a store owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user_id: &UserId, name: &str) -> Result<Store, RepositoryError> {
        let id = StoreId::generate();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO stores (id, user_id, name, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Store {
            id,
            user_id: user_id.clone(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// List the stores owned by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError> {
        let stores = sqlx::query_as::<_, Store>(
            "SELECT id, user_id, name, created_at, updated_at \
             FROM stores WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(stores)
    }

    /// Get a store by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: &StoreId) -> Result<Option<Store>, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT id, user_id, name, created_at, updated_at FROM stores WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// Rename a store owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned store matched.
    pub async fn update_name(
        &self,
        id: &StoreId,
        user_id: &UserId,
        name: &str,
    ) -> Result<Store, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE stores SET name = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(name)
        .bind(now)
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a store owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned store matched, or
    /// `RepositoryError::Conflict` while catalog records still reference it.
    pub async fn delete(&self, id: &StoreId, user_id: &UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM stores WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn test_create_and_ownership() {
        let pool = create_memory_pool().await.unwrap();
        let repo = StoreRepository::new(&pool);

        let owner = UserId::new("user_1");
        let outsider = UserId::new("user_2");
        let store = repo.create(&owner, "Antiques").await.unwrap();

        assert!(repo.is_owned_by(&store.id, &owner).await.unwrap());
        assert!(!repo.is_owned_by(&store.id, &outsider).await.unwrap());
        assert!(
            !repo
                .is_owned_by(&StoreId::new("missing"), &owner)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_requires_owner() {
        let pool = create_memory_pool().await.unwrap();
        let repo = StoreRepository::new(&pool);

        let owner = UserId::new("user_1");
        let store = repo.create(&owner, "Antiques").await.unwrap();

        let err = repo
            .update_name(&store.id, &UserId::new("user_2"), "Hijacked")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        let renamed = repo
            .update_name(&store.id, &owner, "Curios")
            .await
            .unwrap();
        assert_eq!(renamed.name, "Curios");
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let pool = create_memory_pool().await.unwrap();
        let repo = StoreRepository::new(&pool);
        let owner = UserId::new("user_1");

        repo.create(&owner, "First").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create(&owner, "Second").await.unwrap();

        let stores = repo.list_for_user(&owner).await.unwrap();
        assert_eq!(stores.len(), 2);
        assert_eq!(stores.first().unwrap().name, "Second");
    }
}
