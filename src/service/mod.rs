//! Service layer: catalog workflows.
//!
//! [`ProductService`] orchestrates product CRUD and stock change alerts;
//! [`SellerService`] lists and ranks sellers. Both depend only on the
//! storage and notification capabilities, never on a concrete backend.

pub mod product_service;
pub mod seller_service;

pub use product_service::{LIST_PAGE_SIZE, ProductService, page_window};
pub use seller_service::{SellerService, TOP_SELLERS_LIMIT};
