//! # catalog-gateway
//!
//! Versioned REST API over a product and seller catalog.
//!
//! Products support CRUD under both `/api/v1` and `/api/v2`; the version
//! only changes the response shape (v2 embeds a seller reference with a
//! hypermedia self link). Sellers are read-only. Stock changes alert the
//! owning seller on every enabled notification channel after the update is
//! persisted.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── Version resolver (api/version)
//!     ├── REST Handlers (api/handlers)
//!     ├── Versioned views (api/view)
//!     │
//!     ├── ProductService / SellerService (service/)
//!     │       │
//!     │       └── Notifiers: email, SMS (notify/)
//!     │
//!     └── Storage: PostgreSQL or in-memory (persistence/)
//! ```

#![cfg_attr(test, allow(missing_docs, missing_debug_implementations))]

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod persistence;
pub mod service;
