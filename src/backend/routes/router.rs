/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (auth, blog)
 * 2. Page routes (dashboards, sign-in entry, unauthorized)
 * 3. Health check
 * 4. Fallback handler (404 JSON)
 *
 * Every request is traced through `tower_http::trace::TraceLayer`.
 */

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::page_routes::configure_page_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (stores, token service, hasher)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_api_routes(router, &app_state);
    let router = configure_page_routes(router);

    let router = router.route("/health", get(health));

    // Fallback handler for 404
    let router = router.fallback(|| async { BackendError::NotFound("Route") });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
