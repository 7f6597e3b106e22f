//! Size repository.

use chrono::Utc;
use sqlx::SqlitePool;

use shopkeeper_core::{SizeId, StoreId};

use super::RepositoryError;
use crate::models::Size;

const COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

/// Repository for size database operations.
pub struct SizeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SizeRepository<'a> {
    /// Create a new size repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a size in `store_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        name: &str,
        value: &str,
    ) -> Result<Size, RepositoryError> {
        let id = SizeId::generate();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO sizes (id, store_id, name, value, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(store_id)
        .bind(name)
        .bind(value)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Size {
            id,
            store_id: store_id.clone(),
            name: name.to_string(),
            value: value.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// List the sizes of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Size>, RepositoryError> {
        let sizes = sqlx::query_as::<_, Size>(&format!(
            "SELECT {COLUMNS} FROM sizes WHERE store_id = ? ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sizes)
    }

    /// Get a size by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: &SizeId) -> Result<Option<Size>, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(&format!("SELECT {COLUMNS} FROM sizes WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(size)
    }

    /// Replace a size's name and value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no size matched in `store_id`.
    pub async fn update(
        &self,
        id: &SizeId,
        store_id: &StoreId,
        name: &str,
        value: &str,
    ) -> Result<Size, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE sizes SET name = ?, value = ?, updated_at = ? WHERE id = ? AND store_id = ?",
        )
        .bind(name)
        .bind(value)
        .bind(now)
        .bind(id)
        .bind(store_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no size matched in `store_id`,
    /// or `RepositoryError::Conflict` while products still reference it.
    pub async fn delete(&self, id: &SizeId, store_id: &StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM sizes WHERE id = ? AND store_id = ?")
            .bind(id)
            .bind(store_id)
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
    use crate::db::{StoreRepository, create_memory_pool};
    use shopkeeper_core::UserId;

    #[tokio::test]
    async fn test_crud_round_trip() {
        let pool = create_memory_pool().await.unwrap();
        let store = StoreRepository::new(&pool)
            .create(&UserId::new("user_1"), "Antiques")
            .await
            .unwrap();

        let repo = SizeRepository::new(&pool);
        let size = repo.create(&store.id, "Small", "S").await.unwrap();
        assert_eq!(size.value, "S");

        let updated = repo
            .update(&size.id, &store.id, "Medium", "M")
            .await
            .unwrap();
        assert_eq!(updated.name, "Medium");
        assert_eq!(updated.created_at, size.created_at);

        repo.delete(&size.id, &store.id).await.unwrap();
        assert!(repo.list_by_store(&store.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_scoped_to_store() {
        let pool = create_memory_pool().await.unwrap();
        let stores = StoreRepository::new(&pool);
        let mine = stores.create(&UserId::new("user_1"), "Mine").await.unwrap();
        let theirs = stores.create(&UserId::new("user_2"), "Theirs").await.unwrap();

        let repo = SizeRepository::new(&pool);
        let size = repo.create(&mine.id, "Small", "S").await.unwrap();

        // Wrong store id: the row must survive
        let err = repo.delete(&size.id, &theirs.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert!(repo.get_by_id(&size.id).await.unwrap().is_some());
    }
}
