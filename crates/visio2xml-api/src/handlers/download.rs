use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;
use visio2xml_core::models::FileStatus;
use visio2xml_core::AppError;

#[utoipa::path(
    get,
    path = "/api/download/{id}",
    tag = "download",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Converted XML artifact", content_type = "application/xml"),
        (status = 400, description = "Conversion not completed", body = ErrorResponse),
        (status = 404, description = "File or artifact not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %id, operation = "download_artifact"))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entry = state.registry.get(id).await?;

    if entry.status != FileStatus::Completed {
        return Err(AppError::InvalidState("File conversion not completed".to_string()).into());
    }

    // The entry claiming completion without an artifact name, or the artifact
    // being gone from disk, is an inconsistency - surfaced as MissingArtifact
    // so callers can tell it apart from an unknown id.
    let converted_name = entry.converted_name.clone().ok_or_else(|| {
        AppError::MissingArtifact("Converted file not recorded".to_string())
    })?;

    let data = match state.outputs.get(&converted_name).await {
        Ok(data) => data,
        Err(e) if e.is_not_found() => {
            return Err(
                AppError::MissingArtifact("Converted file does not exist".to_string()).into(),
            )
        }
        Err(e) => return Err(e.into()),
    };

    let content_disposition = format!("attachment; filename=\"{}.xml\"", entry.original_name);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/xml")
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
