//! Stock change events dispatched to notification channels.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::{Product, Seller};

/// Delivery medium for a stock change alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    /// Alert sent to the seller's email address.
    Email,
    /// Alert sent to the seller's phone.
    Sms,
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Sms => f.write_str("sms"),
        }
    }
}

/// Transient event describing a change of a product's stock quantity.
///
/// Built once per active channel after the update has been persisted.
/// Never stored and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockChangeEvent {
    /// Owning seller.
    pub seller_uuid: Uuid,
    /// Channel-specific contact value (email or phone).
    pub contact: String,
    /// Stock before the update.
    pub old_stock: u32,
    /// Stock after the update.
    pub new_stock: u32,
    /// Product name after the update.
    pub product_name: String,
}

impl StockChangeEvent {
    /// Builds the event addressed to `seller` over `channel`.
    #[must_use]
    pub fn for_channel(
        seller: &Seller,
        channel: NotificationChannel,
        product: &Product,
        old_stock: u32,
    ) -> Self {
        Self {
            seller_uuid: seller.uuid,
            contact: seller.contact_for(channel).to_string(),
            old_stock,
            new_stock: product.stock,
            product_name: product.name.clone(),
        }
    }
}
