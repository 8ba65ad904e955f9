//! REST endpoint handlers organized by resource.

pub mod product;
pub mod seller;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Routes served under `/api/v1`.
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .merge(product::routes())
        .merge(seller::v1_routes())
}

/// Routes served under `/api/v2`.
pub fn v2_routes() -> Router<AppState> {
    Router::new()
        .merge(product::routes())
        .merge(seller::v2_routes())
}
