//! Template listing handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<String>,
}

/// List all known style template names.
pub async fn list_templates(State(state): State<AppState>) -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: state.catalog.names(),
    })
}
