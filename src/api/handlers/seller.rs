//! Seller handlers: v1 listing, v2 ranking.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::Seller;
use crate::error::{ApiError, ErrorResponse};
use crate::service::TOP_SELLERS_LIMIT;

/// `GET /api/v1/sellers`: List every seller.
///
/// # Errors
///
/// Returns [`ApiError::Storage`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/sellers",
    tag = "Sellers",
    summary = "List sellers",
    responses(
        (status = 200, description = "All sellers", body = Vec<Seller>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_sellers(State(state): State<AppState>) -> Result<Json<Vec<Seller>>, ApiError> {
    Ok(Json(state.seller_service.list().await?))
}

/// `GET /api/v2/sellers/top10`: Sellers with the most products.
///
/// # Errors
///
/// Returns [`ApiError::Storage`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v2/sellers/top10",
    tag = "Sellers",
    summary = "Top 10 sellers",
    description = "Up to 10 sellers ranked by product count, descending. Sellers without products are omitted.",
    responses(
        (status = 200, description = "Ranked sellers", body = Vec<Seller>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn top_sellers(State(state): State<AppState>) -> Result<Json<Vec<Seller>>, ApiError> {
    Ok(Json(state.seller_service.top(TOP_SELLERS_LIMIT).await?))
}

/// Seller routes served under `/api/v1`.
pub fn v1_routes() -> Router<AppState> {
    Router::new().route("/sellers", get(list_sellers))
}

/// Seller routes served under `/api/v2`.
pub fn v2_routes() -> Router<AppState> {
    Router::new().route("/sellers/top10", get(top_sellers))
}
