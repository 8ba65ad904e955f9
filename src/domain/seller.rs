//! Canonical seller record.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::NotificationChannel;

/// A seller as stored in the catalog. Read-only from the API's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Seller {
    /// Internal row identifier (storage-only).
    #[serde(skip)]
    pub id: i64,
    /// Public identifier.
    pub uuid: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email, used by the email channel.
    pub email: String,
    /// Contact phone, used by the SMS channel.
    pub phone: String,
}

impl Seller {
    /// Returns the contact value a notification channel delivers to.
    #[must_use]
    pub fn contact_for(&self, channel: NotificationChannel) -> &str {
        match channel {
            NotificationChannel::Email => &self.email,
            NotificationChannel::Sms => &self.phone,
        }
    }
}
