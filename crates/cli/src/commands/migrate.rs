//! Database migration command.
//!
//! Applies the embedded migrations from `crates/admin/migrations/` to the
//! database named by `DATABASE_URL`.

use shopkeeper_admin::db;

use super::{CommandError, database_url};

/// Run database migrations.
///
/// # Errors
///
/// Returns an error when the environment is incomplete, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
