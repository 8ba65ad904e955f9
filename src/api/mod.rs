//! REST API layer: version resolution, route handlers, DTOs, views, and
//! router composition.
//!
//! Product endpoints are mounted under both `/api/v1` and `/api/v2`. The
//! version resolver runs on every versioned route and attaches a
//! [`version::RequestContext`] that handlers pass to [`view::render`].

pub mod dto;
pub mod handlers;
pub mod version;
pub mod view;

use axum::{Router, middleware};
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::ApiError;

/// OpenAPI document for the catalog API.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "catalog-gateway", description = "Versioned product and seller catalog API"),
    paths(
        handlers::product::list_products,
        handlers::product::get_product,
        handlers::product::create_product,
        handlers::product::update_product,
        handlers::product::delete_product,
        handlers::seller::list_sellers,
        handlers::seller::top_sellers,
        handlers::system::health_handler,
    ),
    components(schemas(view::ProductV2, view::SellerRef, view::Links, view::Link)),
    tags(
        (name = "Products", description = "Product CRUD, shared by v1 and v2"),
        (name = "Sellers", description = "Seller listing and ranking"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::v1_routes())
        .nest("/api/v2", handlers::v2_routes())
        .route_layer(middleware::from_fn(version::resolve_version))
        .merge(handlers::system::routes())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
