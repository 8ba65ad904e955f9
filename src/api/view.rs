//! Versioned product representations.
//!
//! v1 serializes the canonical [`Product`] unchanged. v2 drops `seller_uuid`
//! and embeds the seller as a reference carrying a hypermedia self link built
//! from the request host.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::version::{ApiVersion, RequestContext};
use crate::domain::Product;
use crate::error::ApiError;

/// Hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    /// Link target, `{host}/sellers/{uuid}` for seller references.
    pub href: String,
}

/// Link set attached to an embedded resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Links {
    /// Canonical location of the resource.
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// Seller embedded in a v2 product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SellerRef {
    /// Seller UUID.
    pub uuid: Uuid,
    /// Hypermedia links.
    #[serde(rename = "_links")]
    pub links: Links,
}

/// v2 product representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductV2 {
    /// Product UUID.
    pub uuid: Uuid,
    /// Product name.
    pub name: String,
    /// Product brand.
    pub brand: String,
    /// Units in stock.
    pub stock: u32,
    /// Owning seller.
    pub seller: SellerRef,
}

impl ProductV2 {
    /// Builds the v2 representation of `product` with links rooted at `host`.
    #[must_use]
    pub fn from_product(product: &Product, host: &str) -> Self {
        let seller = product.seller_uuid;
        Self {
            uuid: product.uuid,
            name: product.name.clone(),
            brand: product.brand.clone(),
            stock: product.stock,
            seller: SellerRef {
                uuid: seller,
                links: Links {
                    self_link: Link {
                        href: format!("{host}/sellers/{seller}"),
                    },
                },
            },
        }
    }
}

/// A product payload that has a v2 representation.
///
/// Implemented for single products and product slices so both render
/// through [`render`].
pub trait ProductView: Serialize {
    /// v2 shape of the payload.
    type V2: Serialize;

    /// Client-facing message when encoding fails.
    const MARSHAL_FAILURE: &'static str;

    /// Builds the v2 shape with links rooted at `host`.
    fn to_v2(&self, host: &str) -> Self::V2;
}

impl ProductView for Product {
    type V2 = ProductV2;
    const MARSHAL_FAILURE: &'static str = "Fail to marshal product";

    fn to_v2(&self, host: &str) -> ProductV2 {
        ProductV2::from_product(self, host)
    }
}

impl ProductView for [Product] {
    type V2 = Vec<ProductV2>;
    const MARSHAL_FAILURE: &'static str = "Fail to marshal products";

    fn to_v2(&self, host: &str) -> Vec<ProductV2> {
        self.iter()
            .map(|product| ProductV2::from_product(product, host))
            .collect()
    }
}

/// Encodes a product payload in the representation selected by `ctx`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidVersion`] when the context's version token has
/// no view, or [`ApiError::Serialization`] if encoding fails.
pub fn render<T>(ctx: &RequestContext, payload: &T) -> Result<Value, ApiError>
where
    T: ProductView + ?Sized,
{
    let encoded = match ctx.api_version()? {
        ApiVersion::V1 => serde_json::to_value(payload),
        ApiVersion::V2 => serde_json::to_value(payload.to_v2(&ctx.host)),
    };
    encoded.map_err(ApiError::serialization(T::MARSHAL_FAILURE))
}
