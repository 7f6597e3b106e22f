//! Billboard repository.

use chrono::Utc;
use sqlx::SqlitePool;

use shopkeeper_core::{BillboardId, StoreId};

use super::RepositoryError;
use crate::models::Billboard;

const COLUMNS: &str = "id, store_id, label, image_url, created_at, updated_at";

/// Repository for billboard database operations.
pub struct BillboardRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BillboardRepository<'a> {
    /// Create a new billboard repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a billboard in `store_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, RepositoryError> {
        let id = BillboardId::generate();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO billboards (id, store_id, label, image_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(store_id)
        .bind(label)
        .bind(image_url)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Billboard {
            id,
            store_id: store_id.clone(),
            label: label.to_string(),
            image_url: image_url.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// List the billboards of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<Vec<Billboard>, RepositoryError> {
        let billboards = sqlx::query_as::<_, Billboard>(&format!(
            "SELECT {COLUMNS} FROM billboards WHERE store_id = ? ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(billboards)
    }

    /// Get a billboard by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: &BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let billboard =
            sqlx::query_as::<_, Billboard>(&format!("SELECT {COLUMNS} FROM billboards WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(billboard)
    }

    /// Replace a billboard's label and image URL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no billboard matched in `store_id`.
    pub async fn update(
        &self,
        id: &BillboardId,
        store_id: &StoreId,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE billboards SET label = ?, image_url = ?, updated_at = ? \
             WHERE id = ? AND store_id = ?",
        )
        .bind(label)
        .bind(image_url)
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

    /// Delete a billboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no billboard matched in
    /// `store_id`, or `RepositoryError::Conflict` while categories still
    /// reference it.
    pub async fn delete(&self, id: &BillboardId, store_id: &StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM billboards WHERE id = ? AND store_id = ?")
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
    use crate::db::{CategoryRepository, StoreRepository, create_memory_pool};
    use shopkeeper_core::UserId;

    #[tokio::test]
    async fn test_crud_round_trip() {
        let pool = create_memory_pool().await.unwrap();
        let store = StoreRepository::new(&pool)
            .create(&UserId::new("user_1"), "Antiques")
            .await
            .unwrap();

        let repo = BillboardRepository::new(&pool);
        let billboard = repo
            .create(&store.id, "Summer sale", "https://img.example/summer.png")
            .await
            .unwrap();

        let fetched = repo.get_by_id(&billboard.id).await.unwrap().unwrap();
        assert_eq!(fetched.label, "Summer sale");

        let updated = repo
            .update(
                &billboard.id,
                &store.id,
                "Winter sale",
                "https://img.example/winter.png",
            )
            .await
            .unwrap();
        assert_eq!(updated.label, "Winter sale");

        repo.delete(&billboard.id, &store.id).await.unwrap();
        assert!(repo.get_by_id(&billboard.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_blocked_while_referenced() {
        let pool = create_memory_pool().await.unwrap();
        let store = StoreRepository::new(&pool)
            .create(&UserId::new("user_1"), "Antiques")
            .await
            .unwrap();

        let repo = BillboardRepository::new(&pool);
        let billboard = repo
            .create(&store.id, "Summer sale", "https://img.example/summer.png")
            .await
            .unwrap();
        CategoryRepository::new(&pool)
            .create(&store.id, &billboard.id, "Chairs")
            .await
            .unwrap();

        let err = repo.delete(&billboard.id, &store.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
