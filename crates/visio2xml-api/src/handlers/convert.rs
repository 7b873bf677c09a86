use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use visio2xml_core::models::{ConversionResponse, StatusResponse};
use visio2xml_core::AppError;
use visio2xml_worker::ConversionJob;

#[utoipa::path(
    post,
    path = "/api/convert/{id}",
    tag = "convert",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Conversion started", body = ConversionResponse),
        (status = 400, description = "File is not ready for conversion", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %id, operation = "start_conversion"))]
pub async fn start_conversion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversionResponse>, HttpAppError> {
    // The Uploaded -> Converting transition happens here, before the caller
    // gets its acknowledgment; a status poll after this call never reads a
    // stale Uploaded. A racing second call loses the compare-and-set.
    let entry = state.registry.begin_conversion(id).await?;

    if let Err(e) = state.queue.submit(ConversionJob { file_id: id }).await {
        // The entry must not stay stuck at Converting when no worker will
        // ever pick the job up.
        let _ = state
            .registry
            .fail_conversion(id, "Conversion queue unavailable".to_string())
            .await;
        return Err(AppError::Internal(format!("Failed to schedule conversion: {}", e)).into());
    }

    Ok(Json(ConversionResponse {
        file_id: entry.id,
        status: entry.status,
        message: "Conversion started".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/convert/{id}/status",
    tag = "convert",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Current conversion status", body = StatusResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn conversion_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, HttpAppError> {
    let entry = state.registry.get(id).await?;
    Ok(Json(StatusResponse::for_entry(&entry)))
}
