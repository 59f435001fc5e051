//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{
    get_handler, health_handler, hget_handler, hset_handler, keys_handler, lindex_handler,
    remove_handler, rpush_handler, set_handler, stats_handler, AppState,
};

/// Creates the versioned cache API router.
fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/get/:key", get(get_handler))
        .route("/set", post(set_handler))
        .route("/keys", get(keys_handler))
        .route("/remove/:key", delete(remove_handler))
        .route("/rpush", post(rpush_handler))
        .route("/lindex/:key/:index", get(lindex_handler))
        .route("/hset", post(hset_handler))
        .route("/hget/:key/:hkey", get(hget_handler))
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /v1/get/:key` - Retrieve a value by key
/// - `POST /v1/set` - Store a value
/// - `GET /v1/keys` - List live keys
/// - `DELETE /v1/remove/:key` - Delete a key
/// - `POST /v1/rpush` - Append to a list
/// - `GET /v1/lindex/:key/:index` - Read a list element
/// - `POST /v1/hset` - Merge fields into a hash
/// - `GET /v1/hget/:key/:hkey` - Read a hash field
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
///
/// See [`create_router_with_timeout`] for a request deadline.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/v1", v1_routes())
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Same as [`create_router`], answering `408 Request Timeout` for any
/// request still running after `timeout`. `None` leaves requests unbounded.
pub fn create_router_with_timeout(state: AppState, timeout: Option<Duration>) -> Router {
    let router = create_router(state);
    match timeout {
        Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
        None => router,
    }
}
