//! Recording notifier for tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::StockNotifier;
use crate::domain::{NotificationChannel, StockChangeEvent};
use crate::error::NotifyError;

/// Notifier that captures every event it receives.
///
/// Clones share the captured list. A failing recorder still records the
/// event before returning its error.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    channel: NotificationChannel,
    events: Arc<Mutex<Vec<StockChangeEvent>>>,
    failure: Option<String>,
}

impl RecordingNotifier {
    /// Creates a recorder posing as `channel`.
    #[must_use]
    pub fn new(channel: NotificationChannel) -> Self {
        Self {
            channel,
            events: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Creates a recorder that fails every delivery.
    #[must_use]
    pub fn failing(channel: NotificationChannel, reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new(channel)
        }
    }

    /// Returns all captured events.
    pub async fn events(&self) -> Vec<StockChangeEvent> {
        self.events.lock().await.clone()
    }

    /// Returns the number of captured events.
    pub async fn count(&self) -> usize {
        self.events.lock().await.len()
    }
}

#[async_trait]
impl StockNotifier for RecordingNotifier {
    fn channel(&self) -> NotificationChannel {
        self.channel
    }

    async fn stock_changed(&self, event: &StockChangeEvent) -> Result<(), NotifyError> {
        self.events.lock().await.push(event.clone());
        match &self.failure {
            Some(reason) => Err(NotifyError {
                channel: self.channel,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
