//! Category repository.

use chrono::Utc;
use sqlx::SqlitePool;

use shopkeeper_core::{BillboardId, CategoryId, StoreId};

use super::{BillboardRepository, RepositoryError};
use crate::models::{Category, CategoryDetail};

const COLUMNS: &str = "id, store_id, billboard_id, name, created_at, updated_at";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a category in `store_id`, fronted by `billboard_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the billboard does not exist,
    /// or `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        billboard_id: &BillboardId,
        name: &str,
    ) -> Result<Category, RepositoryError> {
        let id = CategoryId::generate();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO categories (id, store_id, billboard_id, name, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(store_id)
        .bind(billboard_id)
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Category {
            id,
            store_id: store_id.clone(),
            billboard_id: billboard_id.clone(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// List the categories of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {COLUMNS} FROM categories WHERE store_id = ? ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get a category by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category =
            sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM categories WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(category)
    }

    /// Get a category with its billboard included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the referenced billboard
    /// row is missing (the schema forbids this).
    pub async fn get_detail(
        &self,
        id: &CategoryId,
    ) -> Result<Option<CategoryDetail>, RepositoryError> {
        let Some(category) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let billboard = BillboardRepository::new(self.pool)
            .get_by_id(&category.billboard_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "category {id} references missing billboard"
                ))
            })?;

        Ok(Some(CategoryDetail {
            category,
            billboard,
        }))
    }

    /// Replace a category's name and billboard reference.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category matched in `store_id`.
    pub async fn update(
        &self,
        id: &CategoryId,
        store_id: &StoreId,
        billboard_id: &BillboardId,
        name: &str,
    ) -> Result<Category, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE categories SET name = ?, billboard_id = ?, updated_at = ? \
             WHERE id = ? AND store_id = ?",
        )
        .bind(name)
        .bind(billboard_id)
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

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category matched in
    /// `store_id`, or `RepositoryError::Conflict` while products still
    /// reference it.
    pub async fn delete(&self, id: &CategoryId, store_id: &StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ? AND store_id = ?")
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
