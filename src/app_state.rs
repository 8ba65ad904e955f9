//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::notify::Notifiers;
use crate::persistence::{ProductStore, SellerStore};
use crate::service::{ProductService, SellerService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Product workflow.
    pub product_service: Arc<ProductService>,
    /// Seller workflow.
    pub seller_service: Arc<SellerService>,
}

impl AppState {
    /// Wires both workflows over the given storage backends and channels.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductStore>,
        sellers: Arc<dyn SellerStore>,
        notifiers: Notifiers,
    ) -> Self {
        Self {
            product_service: Arc::new(ProductService::new(
                products,
                Arc::clone(&sellers),
                notifiers,
            )),
            seller_service: Arc::new(SellerService::new(sellers)),
        }
    }

    /// Wires both workflows over a single store implementing both
    /// capabilities.
    #[must_use]
    pub fn from_store<S>(store: S, notifiers: Notifiers) -> Self
    where
        S: ProductStore + SellerStore + 'static,
    {
        let store = Arc::new(store);
        Self::new(Arc::clone(&store) as Arc<dyn ProductStore>, store, notifiers)
    }
}
