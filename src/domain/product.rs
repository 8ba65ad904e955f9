//! Canonical product record.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Largest stock quantity a product can hold; the storage column is a
/// signed 32-bit integer.
pub const MAX_STOCK: u32 = i32::MAX.unsigned_abs();

/// A product as stored in the catalog.
///
/// The serialized form is the v1 wire representation: the internal row ID is
/// never exposed, only the public UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Product {
    /// Internal row identifier (storage-only).
    #[serde(skip)]
    pub id: i64,
    /// Public identifier, assigned by the storage gateway on insert.
    pub uuid: Uuid,
    /// Product name.
    pub name: String,
    /// Product brand.
    pub brand: String,
    /// Units in stock.
    pub stock: u32,
    /// UUID of the owning seller (immutable after creation).
    pub seller_uuid: Uuid,
}

impl Product {
    /// Replaces the mutable fields, returning the previous stock quantity.
    pub fn apply_update(&mut self, update: ProductUpdate) -> u32 {
        let old_stock = self.stock;
        self.name = update.name;
        self.brand = update.brand;
        self.stock = update.stock;
        old_stock
    }
}

/// Input for inserting a new product.
///
/// Carries no UUID: the storage gateway generates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Product name.
    pub name: String,
    /// Product brand.
    pub brand: String,
    /// Initial stock.
    pub stock: u32,
    /// UUID of an existing seller.
    pub seller_uuid: Uuid,
}

/// Replacement values for a product update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    /// New name.
    pub name: String,
    /// New brand.
    pub brand: String,
    /// New stock quantity.
    pub stock: u32,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: 7,
            uuid: Uuid::new_v4(),
            name: "Lamp".to_string(),
            brand: "Lumen".to_string(),
            stock: 10,
            seller_uuid: Uuid::new_v4(),
        }
    }

    #[test]
    fn apply_update_returns_previous_stock() {
        let mut product = sample();
        let uuid = product.uuid;
        let seller = product.seller_uuid;

        let old = product.apply_update(ProductUpdate {
            name: "Desk Lamp".to_string(),
            brand: "Lumen Pro".to_string(),
            stock: 4,
        });

        assert_eq!(old, 10);
        assert_eq!(product.stock, 4);
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.uuid, uuid);
        assert_eq!(product.seller_uuid, seller);
    }

    #[test]
    fn serialization_hides_internal_id() {
        let product = sample();
        let Ok(value) = serde_json::to_value(&product) else {
            panic!("serialization failed");
        };
        let Some(obj) = value.as_object() else {
            panic!("expected object");
        };
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["brand", "name", "seller_uuid", "stock", "uuid"]);
    }
}
