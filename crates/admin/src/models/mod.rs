//! Domain models for the admin API.
//!
//! Wire format is camelCase JSON, matching what the dashboard UI consumes.

pub mod billboard;
pub mod category;
pub mod color;
pub mod order;
pub mod product;
pub mod size;
pub mod store;

pub use billboard::Billboard;
pub use category::{Category, CategoryDetail};
pub use color::Color;
pub use order::{Order, OrderItem};
pub use product::{Image, ImageRef, NewProduct, Product, ProductDetail};
pub use size::Size;
pub use store::Store;
