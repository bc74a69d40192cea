//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    expire_handler, get_handler, health_handler, put_handler, reset_handler, stats_handler,
    view_handler, AppState,
};
use crate::cache::Clock;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /put` - Store a key-value pair
/// - `GET /get/:key` - Retrieve an entry by key
/// - `GET /view` - List entries, most recently used first
/// - `POST /expire` - Remove entries older than a maximum age
/// - `POST /reset` - Drop every entry
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: Clock + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/put", put(put_handler::<C>))
        .route("/get/:key", get(get_handler::<C>))
        .route("/view", get(view_handler::<C>))
        .route("/expire", post(expire_handler::<C>))
        .route("/reset", post(reset_handler::<C>))
        .route("/stats", get(stats_handler::<C>))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
