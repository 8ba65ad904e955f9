//! Product request DTOs: query strings and JSON bodies.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{MAX_STOCK, NewProduct, ProductUpdate};
use crate::error::ApiError;

/// Query parameters for `GET /products`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default: 1).
    #[serde(default = "default_page")]
    pub page: u32,
}

const fn default_page() -> u32 {
    1
}

/// Query parameters selecting a single product.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductIdQuery {
    /// Product UUID.
    pub id: Option<String>,
}

impl ProductIdQuery {
    /// Returns the requested product UUID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `id` is absent, empty, or not a
    /// UUID.
    pub fn uuid(&self) -> Result<Uuid, ApiError> {
        let raw = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| ApiError::InvalidRequest("query parameter `id` is required".to_string()))?;

        Uuid::parse_str(raw)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid product id `{raw}`: {e}")))
    }
}

/// Request body for `POST /product`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Product name.
    pub name: String,
    /// Product brand.
    pub brand: String,
    /// Initial stock, at most 2147483647.
    #[schema(maximum = 2147483647)]
    pub stock: u32,
    /// UUID of an existing seller.
    pub seller: Uuid,
}

fn checked_stock(stock: u32) -> Result<u32, ApiError> {
    if stock > MAX_STOCK {
        return Err(ApiError::InvalidRequest(format!(
            "stock must be at most {MAX_STOCK}, got {stock}"
        )));
    }
    Ok(stock)
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ApiError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            stock: checked_stock(req.stock)?,
            name: req.name,
            brand: req.brand,
            seller_uuid: req.seller,
        })
    }
}

/// Request body for `PUT /product`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    /// New name.
    pub name: String,
    /// New brand.
    pub brand: String,
    /// New stock quantity, at most 2147483647.
    #[schema(maximum = 2147483647)]
    pub stock: u32,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = ApiError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            stock: checked_stock(req.stock)?,
            name: req.name,
            brand: req.brand,
        })
    }
}
