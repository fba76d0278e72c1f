pub mod memory;
pub mod products;
pub mod users;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Product, User};

/// Durable storage for products. `save` is the single synchronous persist
/// call a request makes; it upserts so create and update share one path.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn save(&self, product: &Product) -> Result<(), sqlx::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, sqlx::Error>;
    /// Active (non-archived) products, newest first.
    async fn list_active(&self) -> Result<Vec<Product>, sqlx::Error>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), sqlx::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn count(&self) -> Result<i64, sqlx::Error>;
}
