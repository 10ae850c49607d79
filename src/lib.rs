pub mod config;
pub mod dataset;
pub mod error;
pub mod llm;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assembles the full application router with middleware. Shared between the
/// binary and the integration tests.
pub fn app(state: AppState) -> Router {
    let max_body = state.config().max_body_size;

    Router::new()
        .merge(routes::health::router())
        .merge(routes::plan::router())
        .merge(routes::stats::router())
        .merge(routes::feedback::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
