//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    handlers,
    middleware::{RequestIdLayer, cors_layer},
    state::AppState,
};

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/v1/filters", get(handlers::filters::list_filters))
        // Sessions (v1)
        .route("/v1/sessions", post(handlers::sessions::create_session))
        .route(
            "/v1/sessions/{id}",
            axum::routing::delete(handlers::sessions::delete_session),
        )
        .route("/v1/sessions/{id}/search", post(handlers::search::search))
        .route(
            "/v1/sessions/{id}/map",
            get(handlers::map::get_map).post(handlers::map::request_map),
        )
        .route(
            "/v1/sessions/{id}/map.geojson",
            get(handlers::map::get_map_geojson),
        )
        .with_state(state)
}

/// Router wrapped in the server's middleware stack
///
/// The request id layer is outermost so every trace line carries the id.
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_size_json_bytes))
        .layer(TraceLayer::new_for_http());

    let app = if config.cors_enabled {
        app.layer(cors_layer(config))
    } else {
        app
    };

    app.layer(RequestIdLayer::new())
}
