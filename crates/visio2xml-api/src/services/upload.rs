//! Upload intake service.
//!
//! Validates the incoming file, persists the raw bytes, and registers the
//! entry - in that order, so a storage failure leaves no registry entry and a
//! registration failure removes the stored bytes. Either both the file and
//! the entry exist, or neither does.

use axum::extract::Multipart;
use bytes::Bytes;
use std::path::Path;
use uuid::Uuid;

use visio2xml_core::models::FileEntry;
use visio2xml_core::{AppError, AppResult, UploadValidator};
use visio2xml_storage::keys;

use crate::state::AppState;

pub struct UploadService<'a> {
    state: &'a AppState,
}

impl<'a> UploadService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Accept one multipart upload and return the registered entry.
    pub async fn upload(&self, multipart: Multipart) -> AppResult<FileEntry> {
        let (original_name, data) = read_file_part(multipart).await?;

        let validator = UploadValidator::new(
            self.state.config.max_file_size_bytes,
            self.state.config.allowed_extensions.clone(),
        );
        validator.validate(&original_name, data.len())?;

        let id = Uuid::new_v4();
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let stored_name = keys::upload_key(id, extension);

        self.state.uploads.put(&stored_name, data.to_vec()).await?;

        let entry = FileEntry::new(
            id,
            stored_name.clone(),
            original_name,
            data.len() as u64,
        );
        if let Err(e) = self.state.registry.insert(entry.clone()).await {
            if let Err(cleanup_err) = self.state.uploads.delete(&stored_name).await {
                tracing::debug!(
                    error = %cleanup_err,
                    key = %stored_name,
                    "Failed to clean up stored upload after registration error"
                );
            }
            return Err(e);
        }

        tracing::info!(
            file_id = %entry.id,
            original_name = %entry.original_name,
            size_bytes = entry.size_bytes,
            "File uploaded"
        );

        Ok(entry)
    }
}

/// Pull the `file` part out of the multipart body.
async fn read_file_part(mut multipart: Multipart) -> AppResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field
            .file_name()
            .ok_or_else(|| AppError::InvalidInput("Missing filename in upload".to_string()))?
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e)))?;

        return Ok((original_name, data));
    }

    Err(AppError::InvalidInput(
        "Missing 'file' field in upload".to_string(),
    ))
}
