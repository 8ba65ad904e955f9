//! Email channel.

use async_trait::async_trait;

use super::StockNotifier;
use crate::domain::{NotificationChannel, StockChangeEvent};
use crate::error::NotifyError;

/// Sends stock change alerts to the seller's email address.
///
/// Delivery is emitted as a structured log record; there is no SMTP
/// transport behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailNotifier;

impl EmailNotifier {
    /// Creates the email channel.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the human-readable alert.
    #[must_use]
    pub fn render(event: &StockChangeEvent) -> String {
        format!(
            "Email Warning sent to {} (Email: {}): {} Product stock changed",
            event.seller_uuid, event.contact, event.product_name
        )
    }
}

#[async_trait]
impl StockNotifier for EmailNotifier {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Email
    }

    async fn stock_changed(&self, event: &StockChangeEvent) -> Result<(), NotifyError> {
        tracing::info!(
            seller = %event.seller_uuid,
            old_stock = event.old_stock,
            new_stock = event.new_stock,
            "{}",
            Self::render(event)
        );
        Ok(())
    }
}
