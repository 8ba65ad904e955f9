//! In-memory catalog store.
//!
//! [`InMemoryCatalogStore`] keeps sellers and products behind a single
//! [`tokio::sync::RwLock`]. Products are keyed by their internal row ID in a
//! `BTreeMap`, which gives the same stable insertion order the PostgreSQL
//! backend gets from `ORDER BY id_product`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductStore, SellerStore};
use crate::domain::{NewProduct, Product, Seller};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct CatalogTables {
    sellers: Vec<Seller>,
    products: BTreeMap<i64, Product>,
    next_product_id: i64,
}

/// Catalog store held entirely in process memory.
///
/// Clones share the same tables.
///
/// # Concurrency
///
/// Reads proceed in parallel; every write takes the table lock exclusively,
/// so each call is atomic on its own. No guarantee spans two calls.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogStore {
    tables: Arc<RwLock<CatalogTables>>,
}

impl InMemoryCatalogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given sellers.
    #[must_use]
    pub fn with_sellers(sellers: impl IntoIterator<Item = Seller>) -> Self {
        let sellers: Vec<Seller> = sellers.into_iter().collect();
        Self {
            tables: Arc::new(RwLock::new(CatalogTables {
                sellers,
                products: BTreeMap::new(),
                next_product_id: 1,
            })),
        }
    }

    /// Creates a store seeded with the demo sellers shipped in the
    /// database migrations.
    #[must_use]
    pub fn demo() -> Self {
        Self::with_sellers(demo_sellers())
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.tables.read().await.products.len()
    }
}

/// Sellers seeded by `migrations/20240101000001_seed_sellers.sql`.
#[must_use]
pub fn demo_sellers() -> Vec<Seller> {
    vec![
        Seller {
            id: 1,
            uuid: Uuid::from_u128(0xfd15_74eb_920b_4677_b7e0_4768_a5e5_04c0),
            name: "shawn".to_string(),
            email: "s@example.com".to_string(),
            phone: "123-23-23".to_string(),
        },
        Seller {
            id: 2,
            uuid: Uuid::from_u128(0xc943_dc0a_98bb_47b4_9d1d_056b_95d3_f064),
            name: "peter".to_string(),
            email: "p@example.com".to_string(),
            phone: "456-23-23".to_string(),
        },
        Seller {
            id: 3,
            uuid: Uuid::from_u128(0x5b1f_8c3e_6a2d_4e7b_9c1a_2f3d_4e5f_6a7b),
            name: "maria".to_string(),
            email: "m@example.com".to_string(),
            phone: "789-23-23".to_string(),
        },
    ]
}

#[async_trait]
impl ProductStore for InMemoryCatalogStore {
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<Product>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Product>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().find(|p| p.uuid == uuid).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.sellers.iter().any(|s| s.uuid == product.seller_uuid) {
            return Err(StoreError::MissingReference(format!(
                "seller {} vanished during insert",
                product.seller_uuid
            )));
        }

        tables.next_product_id = tables.next_product_id.max(1);
        let id = tables.next_product_id;
        tables.next_product_id = id.saturating_add(1);

        let stored = Product {
            id,
            uuid: Uuid::new_v4(),
            name: product.name,
            brand: product.brand,
            stock: product.stock,
            seller_uuid: product.seller_uuid,
        };
        tables.products.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(stored) = tables.products.values_mut().find(|p| p.uuid == product.uuid) {
            stored.name.clone_from(&product.name);
            stored.brand.clone_from(&product.brand);
            stored.stock = product.stock;
        }
        Ok(())
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.products.retain(|_, p| p.uuid != product.uuid);
        Ok(())
    }
}

#[async_trait]
impl SellerStore for InMemoryCatalogStore {
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Seller>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.sellers.iter().find(|s| s.uuid == uuid).cloned())
    }

    async fn list(&self) -> Result<Vec<Seller>, StoreError> {
        Ok(self.tables.read().await.sellers.clone())
    }

    async fn top(&self, limit: u32) -> Result<Vec<Seller>, StoreError> {
        let tables = self.tables.read().await;

        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        for product in tables.products.values() {
            *counts.entry(product.seller_uuid).or_default() += 1;
        }

        let mut ranked: Vec<(usize, &Seller)> = tables
            .sellers
            .iter()
            .filter_map(|s| counts.get(&s.uuid).map(|&n| (n, s)))
            .collect();
        ranked.sort_by(|(a_count, a), (b_count, b)| {
            b_count.cmp(a_count).then_with(|| a.uuid.cmp(&b.uuid))
        });

        Ok(ranked
            .into_iter()
            .take(limit as usize)
            .map(|(_, s)| s.clone())
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn new_product(seller_uuid: Uuid, name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            brand: "Acme".to_string(),
            stock: 5,
            seller_uuid,
        }
    }

    fn seller_uuid(index: usize) -> Uuid {
        let Some(seller) = demo_sellers().into_iter().nth(index) else {
            panic!("demo seller {index} missing");
        };
        seller.uuid
    }

    #[tokio::test]
    async fn insert_assigns_uuid_and_id() {
        let store = InMemoryCatalogStore::demo();
        let Ok(first) = store.insert(new_product(seller_uuid(0), "a")).await else {
            panic!("insert failed");
        };
        let Ok(second) = store.insert(new_product(seller_uuid(0), "b")).await else {
            panic!("insert failed");
        };
        assert_ne!(first.uuid, second.uuid);
        assert!(second.id > first.id);

        let fetched = ProductStore::find_by_uuid(&store, first.uuid).await;
        assert!(matches!(fetched, Ok(Some(p)) if p == first));
    }

    #[tokio::test]
    async fn insert_with_unknown_seller_fails() {
        let store = InMemoryCatalogStore::demo();
        let result = store.insert(new_product(Uuid::new_v4(), "ghost")).await;
        assert!(matches!(result, Err(StoreError::MissingReference(_))));
        assert_eq!(store.product_count().await, 0);
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order() {
        let store = InMemoryCatalogStore::demo();
        for i in 0..5 {
            let _ = store.insert(new_product(seller_uuid(0), &format!("p{i}"))).await;
        }

        let Ok(page) = ProductStore::list(&store, 2, 2).await else {
            panic!("list failed");
        };
        let names: Vec<&str> = page.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p2", "p3"]);

        let Ok(past_end) = ProductStore::list(&store, 10, 10).await else {
            panic!("list failed");
        };
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_by_uuid() {
        let store = InMemoryCatalogStore::demo();
        let Ok(mut product) = store.insert(new_product(seller_uuid(1), "lamp")).await else {
            panic!("insert failed");
        };

        product.stock = 99;
        product.name = "desk lamp".to_string();
        assert!(store.update(&product).await.is_ok());

        let fetched = ProductStore::find_by_uuid(&store, product.uuid).await;
        assert!(matches!(fetched, Ok(Some(ref p)) if p.stock == 99 && p.name == "desk lamp"));

        assert!(store.delete(&product).await.is_ok());
        let gone = ProductStore::find_by_uuid(&store, product.uuid).await;
        assert!(matches!(gone, Ok(None)));
    }

    #[tokio::test]
    async fn top_ranks_by_product_count_and_skips_empty_sellers() {
        let store = InMemoryCatalogStore::demo();
        let shawn = seller_uuid(0);
        let peter = seller_uuid(1);
        for i in 0..3 {
            let _ = store.insert(new_product(peter, &format!("peter-{i}"))).await;
        }
        let _ = store.insert(new_product(shawn, "shawn-0")).await;

        let Ok(top) = store.top(10).await else {
            panic!("top failed");
        };
        let ranked: Vec<Uuid> = top.iter().map(|s| s.uuid).collect();
        assert_eq!(ranked, [peter, shawn]);

        let Ok(top_one) = store.top(1).await else {
            panic!("top failed");
        };
        assert_eq!(top_one.len(), 1);

        let Ok(none) = store.top(0).await else {
            panic!("top failed");
        };
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn top_breaks_ties_by_uuid() {
        let store = InMemoryCatalogStore::demo();
        for index in 0..3 {
            let _ = store.insert(new_product(seller_uuid(index), "one")).await;
        }

        let Ok(top) = store.top(10).await else {
            panic!("top failed");
        };
        let ranked: Vec<Uuid> = top.iter().map(|s| s.uuid).collect();
        let mut expected: Vec<Uuid> = demo_sellers().iter().map(|s| s.uuid).collect();
        expected.sort();
        assert_eq!(ranked, expected);
    }
}
