//! Product workflow: CRUD orchestration and stock change alerts.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewProduct, Product, ProductUpdate, StockChangeEvent};
use crate::error::ApiError;
use crate::notify::Notifiers;
use crate::persistence::{ProductStore, SellerStore};

/// Fixed number of products per list page.
pub const LIST_PAGE_SIZE: u32 = 10;

/// Returns the `(offset, limit)` window for a 1-based page number.
#[must_use]
pub const fn page_window(page: u32) -> (u32, u32) {
    (
        page.saturating_sub(1).saturating_mul(LIST_PAGE_SIZE),
        LIST_PAGE_SIZE,
    )
}

/// Orchestration layer for product operations.
///
/// Depends only on the storage and notification capabilities. Every
/// mutation follows the pattern: look up → validate → persist → side
/// effects → return. Side effects never run for a write that failed.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    sellers: Arc<dyn SellerStore>,
    notifiers: Notifiers,
}

impl fmt::Debug for ProductService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductService")
            .field("notifiers", &self.notifiers)
            .finish_non_exhaustive()
    }
}

impl ProductService {
    /// Creates a new `ProductService`.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductStore>,
        sellers: Arc<dyn SellerStore>,
        notifiers: Notifiers,
    ) -> Self {
        Self {
            products,
            sellers,
            notifiers,
        }
    }

    /// Returns one page of products.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for `page == 0` and
    /// [`ApiError::Storage`] on storage failure.
    pub async fn list(&self, page: u32) -> Result<Vec<Product>, ApiError> {
        if page == 0 {
            return Err(ApiError::InvalidRequest(
                "page must be a positive integer".to_string(),
            ));
        }
        let (offset, limit) = page_window(page);
        self.products
            .list(offset, limit)
            .await
            .map_err(ApiError::storage("Fail to query product list"))
    }

    /// Returns the product with the given UUID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ProductNotFound`] if absent and
    /// [`ApiError::Storage`] on storage failure.
    pub async fn get(&self, uuid: Uuid) -> Result<Product, ApiError> {
        self.products
            .find_by_uuid(uuid)
            .await
            .map_err(ApiError::storage("Fail to query product by uuid"))?
            .ok_or(ApiError::ProductNotFound)
    }

    /// Creates a product for an existing seller.
    ///
    /// The returned product carries the UUID assigned by the storage gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::SellerNotFound`] if the seller does not resolve
    /// (nothing is inserted) and [`ApiError::Storage`] on storage failure.
    pub async fn create(&self, input: NewProduct) -> Result<Product, ApiError> {
        let seller = self
            .sellers
            .find_by_uuid(input.seller_uuid)
            .await
            .map_err(ApiError::storage("Fail to query seller by UUID"))?
            .ok_or(ApiError::SellerNotFound)?;

        let product = self
            .products
            .insert(NewProduct {
                seller_uuid: seller.uuid,
                ..input
            })
            .await
            .map_err(ApiError::storage("Fail to insert product"))?;

        tracing::info!(uuid = %product.uuid, seller = %seller.uuid, "product created");
        Ok(product)
    }

    /// Replaces name, brand, and stock of a product.
    ///
    /// When the stock quantity changes, every active notification channel is
    /// invoked after the update has been persisted. Alert failures are logged
    /// and do not affect the result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ProductNotFound`] if absent and
    /// [`ApiError::Storage`] if the lookup or the write fails.
    pub async fn update(&self, uuid: Uuid, update: ProductUpdate) -> Result<Product, ApiError> {
        let mut product = self.get(uuid).await?;
        let old_stock = product.apply_update(update);

        self.products
            .update(&product)
            .await
            .map_err(ApiError::storage("Fail to update product"))?;

        tracing::info!(%uuid, old_stock, new_stock = product.stock, "product updated");

        if old_stock != product.stock {
            self.notify_stock_change(&product, old_stock).await;
        }

        Ok(product)
    }

    /// Hard-deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ProductNotFound`] if absent (nothing is deleted)
    /// and [`ApiError::Storage`] on storage failure.
    pub async fn delete(&self, uuid: Uuid) -> Result<(), ApiError> {
        let product = self.get(uuid).await?;

        self.products
            .delete(&product)
            .await
            .map_err(ApiError::storage("Fail to delete product"))?;

        tracing::info!(%uuid, "product deleted");
        Ok(())
    }

    /// Dispatches a stock change alert to every active channel.
    ///
    /// Best-effort: a failing channel is logged and the next one still runs.
    async fn notify_stock_change(&self, product: &Product, old_stock: u32) {
        if self.notifiers.is_empty() {
            return;
        }

        let seller = match self.sellers.find_by_uuid(product.seller_uuid).await {
            Ok(Some(seller)) => seller,
            Ok(None) => {
                tracing::warn!(
                    seller = %product.seller_uuid,
                    "owning seller missing; stock alert skipped"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    seller = %product.seller_uuid,
                    "seller lookup failed; stock alert skipped"
                );
                return;
            }
        };

        for notifier in self.notifiers.iter() {
            let channel = notifier.channel();
            let event = StockChangeEvent::for_channel(&seller, channel, product, old_stock);
            if let Err(e) = notifier.stock_changed(&event).await {
                tracing::warn!(error = %e, %channel, product = %product.uuid, "stock alert failed");
            }
        }
    }
}
