//! HTTP handlers for the catalog domain.

pub mod categories;
pub mod products;

use axum::Router;
use std::sync::Arc;

use crate::service::CatalogService;

/// Create the catalog router with all HTTP endpoints.
pub fn router(service: CatalogService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .nest("/categories", categories::router(shared_service.clone()))
        .nest("/products", products::router(shared_service))
}
