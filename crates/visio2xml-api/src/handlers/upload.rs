use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadService;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use visio2xml_core::models::UploadResponse;

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let service = UploadService::new(&state);
    let entry = service.upload(multipart).await?;

    Ok(Json(UploadResponse {
        file_id: entry.id,
        message: "File uploaded successfully".to_string(),
    }))
}
