use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::handlers;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/health", get(handlers::health))
        .route("/mcp/mcp-health", get(handlers::health))
        // Plain HTTP tool surface
        .route(
            "/mcp/initialize",
            get(handlers::initialize).post(handlers::initialize),
        )
        .route(
            "/mcp/tools/list",
            get(handlers::tools_list).post(handlers::tools_list),
        )
        .route("/mcp/tools/call", post(handlers::tools_call))
        // JSON-RPC 2.0 surface for protocol-shaped clients
        .route("/mcp", post(handlers::mcp_request))
        .layer(TraceLayer::new_for_http())
        // CORS: allow any origin (tool clients may run in various contexts)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
