use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use visio2xml_core::models::{DeleteResponse, FileListResponse};

#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    responses(
        (status = 200, description = "Registry snapshot, newest first", body = FileListResponse)
    )
)]
pub async fn list_files(State(state): State<Arc<AppState>>) -> Json<FileListResponse> {
    let files = state.registry.list().await;
    let total = files.len();
    Json(FileListResponse { files, total })
}

#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File deleted", body = DeleteResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %id, operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    let entry = state.registry.get(id).await?;

    // Storage cleanup is best-effort and runs before the entry is removed: a
    // crash mid-way leaves a retryable entry rather than an orphaned record
    // pointing at deleted files.
    if let Err(e) = state.uploads.delete(&entry.stored_name).await {
        tracing::warn!(file_id = %id, error = %e, "Failed to delete raw upload");
    }
    if let Some(ref converted_name) = entry.converted_name {
        if let Err(e) = state.outputs.delete(converted_name).await {
            tracing::warn!(file_id = %id, error = %e, "Failed to delete converted artifact");
        }
    }

    state.registry.remove(id).await?;

    tracing::info!(file_id = %id, "File deleted");

    Ok(Json(DeleteResponse {
        message: "File deleted successfully".to_string(),
    }))
}
