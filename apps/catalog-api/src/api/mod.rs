//! API routes module

use axum::{Router, response::IntoResponse, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_catalog::CatalogService;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let service = CatalogService::new(state.db.clone());
    domain_catalog::handlers::router(service)
}

/// Router for the readiness endpoint
pub fn ready_router(state: AppState) -> Router {
    Router::new().route("/ready", get(move || ready(state)))
}

/// Readiness check: verifies the database connection is usable.
async fn ready(state: AppState) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async move {
            database::postgres::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    match run_health_checks(checks).await {
        Ok(ready) => ready.into_response(),
        Err(not_ready) => not_ready.into_response(),
    }
}
