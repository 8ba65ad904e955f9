//! SMS channel.

use async_trait::async_trait;

use super::StockNotifier;
use crate::domain::{NotificationChannel, StockChangeEvent};
use crate::error::NotifyError;

/// Sends stock change alerts to the seller's phone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmsNotifier;

impl SmsNotifier {
    /// Creates the SMS channel.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the human-readable alert.
    #[must_use]
    pub fn render(event: &StockChangeEvent) -> String {
        format!(
            "SMS Warning sent to {} (Phone: {}): {} Product stock changed",
            event.seller_uuid, event.contact, event.product_name
        )
    }
}

#[async_trait]
impl StockNotifier for SmsNotifier {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Sms
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
