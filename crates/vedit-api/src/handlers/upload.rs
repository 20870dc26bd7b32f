//! Upload handler.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub file: String,
}

/// Accept a multipart upload and persist it under a fresh artifact name.
///
/// No size or type validation by design; the whole stream is read before
/// the store write.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart stream: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Malformed multipart stream: {e}")))?;

        let name = state.store.save_upload(&original_name, &bytes).await?;

        info!(artifact = %name, size = bytes.len(), "Upload complete");

        return Ok(Json(UploadResponse {
            message: "Upload complete".to_string(),
            file: name,
        }));
    }

    Err(ApiError::bad_request("Missing 'file' field"))
}
