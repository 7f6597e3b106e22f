//! Database operations for the admin API.
//!
//! # Tables
//!
//! - `stores` - Tenants; root of ownership for everything below
//! - `billboards` - Promotional image + label per store
//! - `categories` - Product categories, each referencing one billboard
//! - `sizes` / `colors` - Catalog option values per store
//! - `products` / `product_images` - Catalog entries with image collections
//! - `orders` / `order_items` - Checkout output, read-only here
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/`, embedded via
//! [`MIGRATOR`], and applied at server startup. They can also be run ahead
//! of a deploy via:
//! ```bash
//! cargo run -p shopkeeper-cli -- migrate
//! ```

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use billboards::BillboardRepository;
pub use categories::CategoryRepository;
pub use colors::ColorRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use sizes::SizeRepository;
pub use stores::StoreRepository;

/// Embedded migrations from `crates/admin/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (referential or uniqueness).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match &err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::ForeignKeyViolation => {
                    Self::Conflict("record is referenced by other records".to_string())
                }
                ErrorKind::UniqueViolation => Self::Conflict("record already exists".to_string()),
                _ => Self::Database(err),
            },
            _ => Self::Database(err),
        }
    }
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Foreign key enforcement is switched on explicitly; the referential rules
/// in the schema are what turn dangling deletes into conflicts.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a hermetic in-memory pool with the schema applied.
///
/// Every caller gets a fresh database. The pool is capped at a single
/// connection because each `SQLite` `:memory:` connection is its own
/// database.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection or migration fails.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // The server migrates on startup and the CLI migrates on demand, so the
    // same database may see both. A repeat run must be a no-op and the
    // schema must be queryable afterwards.
    #[tokio::test]
    async fn test_migrator_is_idempotent() {
        let pool = create_memory_pool().await.unwrap();

        MIGRATOR.run(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stores")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
