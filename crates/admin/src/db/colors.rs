//! Color repository.

use chrono::Utc;
use sqlx::SqlitePool;

use shopkeeper_core::{ColorId, StoreId};

use super::RepositoryError;
use crate::models::Color;

const COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

/// Repository for color database operations.
pub struct ColorRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ColorRepository<'a> {
    /// Create a new color repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a color in `store_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        name: &str,
        value: &str,
    ) -> Result<Color, RepositoryError> {
        let id = ColorId::generate();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO colors (id, store_id, name, value, created_at, updated_at) \
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

        Ok(Color {
            id,
            store_id: store_id.clone(),
            name: name.to_string(),
            value: value.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// List the colors of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Color>, RepositoryError> {
        let colors = sqlx::query_as::<_, Color>(&format!(
            "SELECT {COLUMNS} FROM colors WHERE store_id = ? ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(colors)
    }

    /// Get a color by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: &ColorId) -> Result<Option<Color>, RepositoryError> {
        let color = sqlx::query_as::<_, Color>(&format!("SELECT {COLUMNS} FROM colors WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(color)
    }

    /// Replace a color's name and value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no color matched in `store_id`.
    pub async fn update(
        &self,
        id: &ColorId,
        store_id: &StoreId,
        name: &str,
        value: &str,
    ) -> Result<Color, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE colors SET name = ?, value = ?, updated_at = ? WHERE id = ? AND store_id = ?",
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

    /// Delete a color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no color matched in `store_id`,
    /// or `RepositoryError::Conflict` while products still reference it.
    pub async fn delete(&self, id: &ColorId, store_id: &StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM colors WHERE id = ? AND store_id = ?")
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
