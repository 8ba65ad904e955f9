//! Persistence layer: storage gateway capabilities and backends.
//!
//! The workflows depend only on [`ProductStore`] and [`SellerStore`].
//! [`PostgresCatalogStore`] implements both over a `sqlx::PgPool`;
//! [`InMemoryCatalogStore`] implements both over lock-guarded maps and backs
//! the database-less mode and the tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewProduct, Product, Seller};
use crate::error::StoreError;

pub use memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

/// Product persistence capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns up to `limit` products starting at `offset`, in a stable
    /// storage order.
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<Product>, StoreError>;

    /// Returns the product with the given public UUID, if any.
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Product>, StoreError>;

    /// Persists a new product, generating its UUID.
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Overwrites name, brand, and stock of an existing product.
    async fn update(&self, product: &Product) -> Result<(), StoreError>;

    /// Hard-deletes a product.
    async fn delete(&self, product: &Product) -> Result<(), StoreError>;
}

/// Seller persistence capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SellerStore: Send + Sync {
    /// Returns the seller with the given public UUID, if any.
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Seller>, StoreError>;

    /// Returns all sellers in storage order.
    async fn list(&self) -> Result<Vec<Seller>, StoreError>;

    /// Returns up to `limit` sellers owning at least one product, ranked by
    /// descending product count, ties broken by ascending UUID.
    async fn top(&self, limit: u32) -> Result<Vec<Seller>, StoreError>;
}
