//! Database seed command.
//!
//! Builds one demo store with a small catalog so a fresh environment has
//! something to browse. Safe to run more than once; each run creates a new
//! store.

use rust_decimal::Decimal;

use shopkeeper_admin::db::{
    self, BillboardRepository, CategoryRepository, ColorRepository, ProductRepository,
    SizeRepository, StoreRepository,
};
use shopkeeper_admin::models::NewProduct;
use shopkeeper_core::UserId;

use super::{CommandError, database_url};

/// Seed the database with a demo store owned by `user`.
///
/// # Errors
///
/// Returns an error when the environment is incomplete or any insert fails.
pub async fn run(user: &str) -> Result<(), CommandError> {
    let url = database_url()?;
    let pool = db::create_pool(&url).await?;
    let owner = UserId::new(user);

    tracing::info!("Seeding demo store for user {user}...");

    let store = StoreRepository::new(&pool)
        .create(&owner, "Demo Store")
        .await?;

    let billboard = BillboardRepository::new(&pool)
        .create(
            &store.id,
            "Summer collection",
            "https://example.com/billboards/summer.jpg",
        )
        .await?;

    let category = CategoryRepository::new(&pool)
        .create(&store.id, &billboard.id, "Shirts")
        .await?;

    let sizes = SizeRepository::new(&pool);
    let small = sizes.create(&store.id, "Small", "S").await?;
    sizes.create(&store.id, "Medium", "M").await?;
    sizes.create(&store.id, "Large", "L").await?;

    let colors = ColorRepository::new(&pool);
    let white = colors.create(&store.id, "White", "#FFFFFF").await?;
    colors.create(&store.id, "Black", "#000000").await?;

    let product = NewProduct {
        name: "Linen shirt".to_string(),
        price: Decimal::new(4999, 2),
        category_id: category.id.clone(),
        size_id: small.id.clone(),
        color_id: white.id.clone(),
        is_featured: true,
        is_archived: false,
        image_urls: vec![
            "https://example.com/products/linen-front.jpg".to_string(),
            "https://example.com/products/linen-back.jpg".to_string(),
        ],
    };
    ProductRepository::new(&pool).create(&store.id, &product).await?;

    tracing::info!("Seeded store {}", store.id);
    Ok(())
}
