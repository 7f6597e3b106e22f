//! Product repository.
//!
//! Products carry an ordered image collection; replacing it on update is
//! done inside one transaction (delete-all + insert-all) so a caller never
//! observes a mix of old and new images.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use shopkeeper_core::{CategoryId, ColorId, ImageId, ProductId, SizeId, StoreId};

use super::{CategoryRepository, ColorRepository, RepositoryError, SizeRepository};
use crate::models::{Image, NewProduct, Product, ProductDetail};

const COLUMNS: &str = "id, store_id, category_id, size_id, color_id, name, price, \
                       is_featured, is_archived, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, product_id, url, position, created_at, updated_at";

/// Internal row type for product queries; the decimal price is TEXT in the
/// database.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    store_id: StoreId,
    category_id: CategoryId,
    size_id: SizeId,
    color_id: ColorId,
    name: String,
    price: String,
    is_featured: bool,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, images: Vec<Image>) -> Result<Product, RepositoryError> {
        let price = Decimal::from_str(&self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Product {
            id: self.id,
            store_id: self.store_id,
            category_id: self.category_id,
            size_id: self.size_id,
            color_id: self.color_id,
            name: self.name,
            price,
            is_featured: self.is_featured,
            is_archived: self.is_archived,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Optional list filters, matching the storefront-facing query parameters.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub size_id: Option<SizeId>,
    pub color_id: Option<ColorId>,
    pub is_featured: Option<bool>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a product in `store_id` together with its image collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a referenced category, size, or
    /// color does not exist.
    pub async fn create(
        &self,
        store_id: &StoreId,
        data: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let id = ProductId::generate();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO products \
             (id, store_id, category_id, size_id, color_id, name, price, \
              is_featured, is_archived, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(store_id)
        .bind(&data.category_id)
        .bind(&data.size_id)
        .bind(&data.color_id)
        .bind(&data.name)
        .bind(data.price.to_string())
        .bind(data.is_featured)
        .bind(data.is_archived)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let images = insert_images(&mut tx, &id, &data.image_urls, now).await?;

        tx.commit().await?;

        Ok(Product {
            id,
            store_id: store_id.clone(),
            category_id: data.category_id.clone(),
            size_id: data.size_id.clone(),
            color_id: data.color_id.clone(),
            name: data.name.clone(),
            price: data.price,
            is_featured: data.is_featured,
            is_archived: data.is_archived,
            images,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace a product's scalar fields and atomically swap its image
    /// collection for the submitted one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product matched in `store_id`.
    pub async fn update(
        &self,
        id: &ProductId,
        store_id: &StoreId,
        data: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE products SET name = ?, price = ?, category_id = ?, size_id = ?, \
             color_id = ?, is_featured = ?, is_archived = ?, updated_at = ? \
             WHERE id = ? AND store_id = ?",
        )
        .bind(&data.name)
        .bind(data.price.to_string())
        .bind(&data.category_id)
        .bind(&data.size_id)
        .bind(&data.color_id)
        .bind(data.is_featured)
        .bind(data.is_archived)
        .bind(now)
        .bind(id)
        .bind(store_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM product_images WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let images = insert_images(&mut tx, id, &data.image_urls, now).await?;

        // created_at is the only field not determined by this write.
        let (created_at,): (DateTime<Utc>,) =
            sqlx::query_as("SELECT created_at FROM products WHERE id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Product {
            id: id.clone(),
            store_id: store_id.clone(),
            category_id: data.category_id.clone(),
            size_id: data.size_id.clone(),
            color_id: data.color_id.clone(),
            name: data.name.clone(),
            price: data.price,
            is_featured: data.is_featured,
            is_archived: data.is_archived,
            images,
            created_at,
            updated_at: now,
        })
    }

    /// Get a product with its images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let images = self.images_for(id).await?;
        Ok(Some(row.into_product(images)?))
    }

    /// Get a product with images and relations included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a referenced relation row
    /// is missing (the schema forbids this).
    pub async fn get_detail(
        &self,
        id: &ProductId,
    ) -> Result<Option<ProductDetail>, RepositoryError> {
        let Some(product) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let category = CategoryRepository::new(self.pool)
            .get_by_id(&product.category_id)
            .await?
            .ok_or_else(|| missing_relation(id, "category"))?;
        let size = SizeRepository::new(self.pool)
            .get_by_id(&product.size_id)
            .await?
            .ok_or_else(|| missing_relation(id, "size"))?;
        let color = ColorRepository::new(self.pool)
            .get_by_id(&product.color_id)
            .await?
            .ok_or_else(|| missing_relation(id, "color"))?;

        Ok(Some(ProductDetail {
            product,
            category,
            size,
            color,
        }))
    }

    /// List the non-archived products of a store, newest first, with
    /// relations included and the optional filters applied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_by_store(
        &self,
        store_id: &StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let mut query = sqlx::QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM products WHERE is_archived = FALSE AND store_id = "
        ));
        query.push_bind(store_id);
        if let Some(category_id) = &filter.category_id {
            query.push(" AND category_id = ").push_bind(category_id);
        }
        if let Some(size_id) = &filter.size_id {
            query.push(" AND size_id = ").push_bind(size_id);
        }
        if let Some(color_id) = &filter.color_id {
            query.push(" AND color_id = ").push_bind(color_id);
        }
        if let Some(is_featured) = filter.is_featured {
            query.push(" AND is_featured = ").push_bind(is_featured);
        }
        query.push(" ORDER BY created_at DESC");

        let rows: Vec<ProductRow> = query.build_query_as().fetch_all(self.pool).await?;

        // Resolve relations through per-store lookup maps instead of a wide
        // join; admin catalogs are small.
        let categories: HashMap<CategoryId, _> = CategoryRepository::new(self.pool)
            .list_by_store(store_id)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let sizes: HashMap<SizeId, _> = SizeRepository::new(self.pool)
            .list_by_store(store_id)
            .await?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        let colors: HashMap<ColorId, _> = ColorRepository::new(self.pool)
            .list_by_store(store_id)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let mut images = self.images_by_store(store_id).await?;

        rows.into_iter()
            .map(|row| {
                let product_images = images.remove(&row.id).unwrap_or_default();
                let category = categories
                    .get(&row.category_id)
                    .cloned()
                    .ok_or_else(|| missing_relation(&row.id, "category"))?;
                let size = sizes
                    .get(&row.size_id)
                    .cloned()
                    .ok_or_else(|| missing_relation(&row.id, "size"))?;
                let color = colors
                    .get(&row.color_id)
                    .cloned()
                    .ok_or_else(|| missing_relation(&row.id, "color"))?;

                Ok(ProductDetail {
                    product: row.into_product(product_images)?,
                    category,
                    size,
                    color,
                })
            })
            .collect()
    }

    /// Delete a product; its images cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product matched in
    /// `store_id`, or `RepositoryError::Conflict` while order items still
    /// reference it.
    pub async fn delete(&self, id: &ProductId, store_id: &StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ? AND store_id = ?")
            .bind(id)
            .bind(store_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count of non-archived products in a store (dashboard "in stock").
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stock_count(&self, store_id: &StoreId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM products WHERE store_id = ? AND is_archived = FALSE",
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    async fn images_for(&self, product_id: &ProductId) -> Result<Vec<Image>, RepositoryError> {
        let images = sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM product_images WHERE product_id = ? ORDER BY position"
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    async fn images_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<HashMap<ProductId, Vec<Image>>, RepositoryError> {
        let images = sqlx::query_as::<_, Image>(&format!(
            "SELECT i.id, i.product_id, i.url, i.position, i.created_at, i.updated_at \
             FROM product_images i \
             JOIN products p ON p.id = i.product_id \
             WHERE p.store_id = ? ORDER BY i.position"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        let mut by_product: HashMap<ProductId, Vec<Image>> = HashMap::new();
        for image in images {
            by_product
                .entry(image.product_id.clone())
                .or_default()
                .push(image);
        }

        Ok(by_product)
    }
}

async fn insert_images(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    product_id: &ProductId,
    urls: &[String],
    now: DateTime<Utc>,
) -> Result<Vec<Image>, RepositoryError> {
    let mut images = Vec::with_capacity(urls.len());

    for (position, url) in urls.iter().enumerate() {
        let image = Image {
            id: ImageId::generate(),
            product_id: product_id.clone(),
            url: url.clone(),
            position: position as i64,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO product_images (id, product_id, url, position, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&image.id)
        .bind(&image.product_id)
        .bind(&image.url)
        .bind(image.position)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await?;

        images.push(image);
    }

    Ok(images)
}

fn missing_relation(id: &ProductId, relation: &str) -> RepositoryError {
    RepositoryError::DataCorruption(format!("product {id} references missing {relation}"))
}
