//! PostgreSQL implementation of the storage gateway.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::{ProductStore, SellerStore};
use crate::config::GatewayConfig;
use crate::domain::{NewProduct, Product, Seller};
use crate::error::StoreError;

type ProductRow = (i64, Uuid, String, String, i32, Uuid);
type SellerRow = (i64, Uuid, String, String, String);

const PRODUCT_COLUMNS: &str = "SELECT p.id_product, p.uuid, p.name, p.brand, p.stock, s.uuid \
     FROM product p INNER JOIN seller s ON s.id_seller = p.fk_seller";

/// PostgreSQL-backed catalog store using `sqlx::PgPool`.
///
/// The pool is shared by all concurrent requests.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the database is unreachable.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn product_from_row(row: ProductRow) -> Result<Product, StoreError> {
    let (id, uuid, name, brand, stock, seller_uuid) = row;
    let stock = u32::try_from(stock)
        .map_err(|_| StoreError::CorruptRow(format!("negative stock {stock} for product {uuid}")))?;
    Ok(Product {
        id,
        uuid,
        name,
        brand,
        stock,
        seller_uuid,
    })
}

fn seller_from_row((id, uuid, name, email, phone): SellerRow) -> Seller {
    Seller {
        id,
        uuid,
        name,
        email,
        phone,
    }
}

fn stock_to_column(stock: u32) -> Result<i32, StoreError> {
    i32::try_from(stock).map_err(|_| StoreError::CorruptRow(format!("stock {stock} out of range")))
}

#[async_trait]
impl ProductStore for PostgresCatalogStore {
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{PRODUCT_COLUMNS} ORDER BY p.id_product LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(product_from_row).collect()
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{PRODUCT_COLUMNS} WHERE p.uuid = $1"))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        row.map(product_from_row).transpose()
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let uuid = Uuid::new_v4();
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO product (uuid, name, brand, stock, fk_seller) \
             SELECT $1, $2, $3, $4, s.id_seller FROM seller s WHERE s.uuid = $5 \
             RETURNING id_product",
        )
        .bind(uuid)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(stock_to_column(product.stock)?)
        .bind(product.seller_uuid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            StoreError::MissingReference(format!("seller {} vanished during insert", product.seller_uuid))
        })?;

        tracing::debug!(%uuid, id, "product row inserted");
        Ok(Product {
            id,
            uuid,
            name: product.name,
            brand: product.brand,
            stock: product.stock,
            seller_uuid: product.seller_uuid,
        })
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query("UPDATE product SET name = $1, brand = $2, stock = $3 WHERE uuid = $4")
            .bind(&product.name)
            .bind(&product.brand)
            .bind(stock_to_column(product.stock)?)
            .bind(product.uuid)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM product WHERE uuid = $1")
            .bind(product.uuid)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SellerStore for PostgresCatalogStore {
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Seller>, StoreError> {
        let row = sqlx::query_as::<_, SellerRow>(
            "SELECT id_seller, uuid, name, email, phone FROM seller WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(seller_from_row))
    }

    async fn list(&self) -> Result<Vec<Seller>, StoreError> {
        let rows = sqlx::query_as::<_, SellerRow>(
            "SELECT id_seller, uuid, name, email, phone FROM seller ORDER BY id_seller",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(seller_from_row).collect())
    }

    async fn top(&self, limit: u32) -> Result<Vec<Seller>, StoreError> {
        let rows = sqlx::query_as::<_, SellerRow>(
            "SELECT s.id_seller, s.uuid, s.name, s.email, s.phone FROM seller s \
             INNER JOIN product p ON p.fk_seller = s.id_seller \
             GROUP BY s.id_seller \
             ORDER BY COUNT(p.id_product) DESC, s.uuid ASC \
             LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(seller_from_row).collect())
    }
}
