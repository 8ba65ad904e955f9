//! Seller workflow: listing and ranking.

use std::fmt;
use std::sync::Arc;

use crate::domain::Seller;
use crate::error::ApiError;
use crate::persistence::SellerStore;

/// Number of sellers returned by the v2 top sellers endpoint.
pub const TOP_SELLERS_LIMIT: u32 = 10;

/// Read-only orchestration over sellers.
#[derive(Clone)]
pub struct SellerService {
    sellers: Arc<dyn SellerStore>,
}

impl fmt::Debug for SellerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SellerService").finish_non_exhaustive()
    }
}

impl SellerService {
    /// Creates a new `SellerService`.
    #[must_use]
    pub fn new(sellers: Arc<dyn SellerStore>) -> Self {
        Self { sellers }
    }

    /// Returns every seller in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on storage failure.
    pub async fn list(&self) -> Result<Vec<Seller>, ApiError> {
        self.sellers
            .list()
            .await
            .map_err(ApiError::storage("Fail to query seller list"))
    }

    /// Returns up to `limit` sellers ranked by how many products they own.
    /// Sellers without products are never included.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on storage failure.
    pub async fn top(&self, limit: u32) -> Result<Vec<Seller>, ApiError> {
        let mut sellers = self
            .sellers
            .top(limit)
            .await
            .map_err(ApiError::storage("Fail to query seller list"))?;
        // Never more than `limit`, whatever the backend returns.
        sellers.truncate(limit as usize);
        Ok(sellers)
    }
}
