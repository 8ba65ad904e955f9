//! Domain layer: canonical catalog entities.
//!
//! Products and sellers as the storage gateway returns them, plus the
//! transient [`StockChangeEvent`] produced when a product's stock moves.

pub mod product;
pub mod seller;
pub mod stock_event;

pub use product::{MAX_STOCK, NewProduct, Product, ProductUpdate};
pub use seller::Seller;
pub use stock_event::{NotificationChannel, StockChangeEvent};
