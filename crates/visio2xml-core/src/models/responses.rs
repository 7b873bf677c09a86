//! API response payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{FileEntry, FileStatus};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub file_id: Uuid,
    pub message: String,
}

/// Returned by the convert endpoint when a conversion is accepted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    pub file_id: Uuid,
    pub status: FileStatus,
    pub message: String,
}

/// Returned by the status endpoint while a caller polls a conversion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub file_id: Uuid,
    pub status: FileStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl StatusResponse {
    /// Build the status view for an entry: failure reason when failed, a
    /// download reference when completed.
    pub fn for_entry(entry: &FileEntry) -> Self {
        let message = match entry.status {
            FileStatus::Failed => entry
                .error_message
                .clone()
                .unwrap_or_else(|| "Conversion failed".to_string()),
            status => format!("File is {}", status),
        };
        let download_url = match entry.status {
            FileStatus::Completed => Some(format!("/api/download/{}", entry.id)),
            _ => None,
        };
        StatusResponse {
            file_id: entry.id,
            status: entry.status,
            message,
            download_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileListResponse {
    pub files: Vec<FileEntry>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}
