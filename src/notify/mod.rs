//! Notification gateway: stock change alerts to sellers.
//!
//! Each channel implements [`StockNotifier`]. The set of active channels is
//! an explicit [`Notifiers`] list chosen from configuration at startup; an
//! empty list is valid and disables alerts.

pub mod email;
/// In-memory notifier for tests; not part of the supported API.
#[doc(hidden)]
pub mod recording;
pub mod sms;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::GatewayConfig;
use crate::domain::{NotificationChannel, StockChangeEvent};
use crate::error::NotifyError;

pub use email::EmailNotifier;
#[doc(hidden)]
pub use recording::RecordingNotifier;
pub use sms::SmsNotifier;

/// A delivery channel for stock change alerts.
#[async_trait]
pub trait StockNotifier: Send + Sync {
    /// Channel this notifier delivers over. Decides which seller contact
    /// field the event carries.
    fn channel(&self) -> NotificationChannel;

    /// Delivers the alert.
    async fn stock_changed(&self, event: &StockChangeEvent) -> Result<(), NotifyError>;
}

/// Ordered list of active notification channels.
#[derive(Clone, Default)]
pub struct Notifiers {
    channels: Vec<Arc<dyn StockNotifier>>,
}

impl Notifiers {
    /// Creates a list with no active channels.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds the channel list from the `NOTIFY_EMAIL` / `NOTIFY_SMS` flags.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut notifiers = Self::none();
        if config.notify_email {
            notifiers = notifiers.with(Arc::new(EmailNotifier::new()));
        }
        if config.notify_sms {
            notifiers = notifiers.with(Arc::new(SmsNotifier::new()));
        }
        notifiers
    }

    /// Appends a channel.
    #[must_use]
    pub fn with(mut self, notifier: Arc<dyn StockNotifier>) -> Self {
        self.channels.push(notifier);
        self
    }

    /// Returns the active channels in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn StockNotifier>> {
        self.channels.iter()
    }

    /// Returns the number of active channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns `true` if no channel is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl fmt::Debug for Notifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.channels.iter().map(|n| n.channel()))
            .finish()
    }
}
