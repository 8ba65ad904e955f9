//! Product CRUD handlers: list, get, create, update, delete.
//!
//! Mounted under both `/api/v1` and `/api/v2`; the response shape follows
//! the [`RequestContext`] attached by the version resolver.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::{Value, json};

use crate::api::dto::{CreateProductRequest, PageQuery, ProductIdQuery, UpdateProductRequest};
use crate::api::version::RequestContext;
use crate::api::view;
use crate::app_state::AppState;
use crate::domain::Product;
use crate::error::{ApiError, ErrorResponse};

/// `GET /products?page=N`: List one page of products.
///
/// # Errors
///
/// Returns [`ApiError`] on a malformed page or storage failure.
#[utoipa::path(
    get,
    path = "/api/{version}/products",
    tag = "Products",
    summary = "List products",
    description = "Returns page `page` (1-based, 10 per page) ordered by insertion. v2 embeds a seller reference with a self link in every product.",
    params(
        ("version" = String, Path, description = "API version (`v1` or `v2`)"),
        PageQuery,
    ),
    responses(
        (status = 200, description = "Product page", body = Vec<Product>),
        (status = 400, description = "Invalid page", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let products = state.product_service.list(query.page).await?;
    Ok(Json(view::render(&ctx, products.as_slice())?))
}

/// `GET /product?id=UUID`: Get one product.
///
/// # Errors
///
/// Returns [`ApiError::ProductNotFound`] if no product has the UUID.
#[utoipa::path(
    get,
    path = "/api/{version}/product",
    tag = "Products",
    summary = "Get a product",
    params(
        ("version" = String, Path, description = "API version (`v1` or `v2`)"),
        ProductIdQuery,
    ),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 400, description = "Missing id or product not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    query: Result<Query<ProductIdQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let product = state.product_service.get(query.uuid()?).await?;
    Ok(Json(view::render(&ctx, &product)?))
}

/// `POST /product`: Create a product for an existing seller.
///
/// # Errors
///
/// Returns [`ApiError::SellerNotFound`] if `seller` does not resolve.
#[utoipa::path(
    post,
    path = "/api/{version}/product",
    tag = "Products",
    summary = "Create a product",
    description = "Persists a new product. The UUID is assigned by storage.",
    params(
        ("version" = String, Path, description = "API version (`v1` or `v2`)"),
    ),
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Created product", body = Product),
        (status = 400, description = "Malformed body or unknown seller", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body?;
    let product = state.product_service.create(req.try_into()?).await?;
    Ok(Json(view::render(&ctx, &product)?))
}

/// `PUT /product?id=UUID`: Replace a product's name, brand, and stock.
///
/// Stock changes alert the owning seller on every enabled channel after
/// the update is persisted.
///
/// # Errors
///
/// Returns [`ApiError::ProductNotFound`] if no product has the UUID.
#[utoipa::path(
    put,
    path = "/api/{version}/product",
    tag = "Products",
    summary = "Update a product",
    params(
        ("version" = String, Path, description = "API version (`v1` or `v2`)"),
        ProductIdQuery,
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Malformed input or product not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    query: Result<Query<ProductIdQuery>, QueryRejection>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let uuid = query.uuid()?;
    let Json(req) = body?;
    let product = state.product_service.update(uuid, req.try_into()?).await?;
    Ok(Json(view::render(&ctx, &product)?))
}

/// `DELETE /product?id=UUID`: Delete a product.
///
/// # Errors
///
/// Returns [`ApiError::ProductNotFound`] if no product has the UUID.
#[utoipa::path(
    delete,
    path = "/api/{version}/product",
    tag = "Products",
    summary = "Delete a product",
    params(
        ("version" = String, Path, description = "API version (`v1` or `v2`)"),
        ProductIdQuery,
    ),
    responses(
        (status = 200, description = "Deleted; empty object body", body = serde_json::Value),
        (status = 400, description = "Missing id or product not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    query: Result<Query<ProductIdQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    state.product_service.delete(query.uuid()?).await?;
    Ok(Json(json!({})))
}

/// Product routes, shared by every API version.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route(
            "/product",
            get(get_product)
                .post(create_product)
                .put(update_product)
                .delete(delete_product),
        )
}
