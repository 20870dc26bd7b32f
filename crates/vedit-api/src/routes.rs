//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::handlers::health::health;
use crate::handlers::home::index;
use crate::handlers::pipeline::{generate_subtitles, remove_silence, render_with_subtitles};
use crate::handlers::templates::list_templates;
use crate::handlers::upload::upload;
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/remove_silence", post(remove_silence))
        .route("/generate_subtitles", post(generate_subtitles))
        .route("/list_templates", get(list_templates))
        .route("/render_with_subtitles", post(render_with_subtitles));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        // Artifacts are retrievable by name, straight from the store
        .nest_service("/static", ServeDir::new(state.store.root()))
        // Uploads have no size cap as part of the external contract
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
