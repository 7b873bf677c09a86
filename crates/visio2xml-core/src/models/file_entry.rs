use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of an uploaded file.
///
/// Transitions are monotonic: `Uploaded -> Converting -> Completed | Failed`.
/// Terminal states are never left.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Uploaded,
    Converting,
    Completed,
    Failed,
}

impl FileStatus {
    /// Whether the state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileStatus::Completed | FileStatus::Failed)
    }
}

impl Display for FileStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileStatus::Uploaded => write!(f, "uploaded"),
            FileStatus::Converting => write!(f, "converting"),
            FileStatus::Completed => write!(f, "completed"),
            FileStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for FileStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(FileStatus::Uploaded),
            "converting" => Ok(FileStatus::Converting),
            "completed" => Ok(FileStatus::Completed),
            "failed" => Ok(FileStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid file status: {}", s)),
        }
    }
}

/// The unit of work: one uploaded file tracked through its conversion
/// lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileEntry {
    pub id: Uuid,
    /// Name under which the raw bytes are persisted (`{id}.{ext}`).
    pub stored_name: String,
    /// Client-supplied filename, kept for display and download naming only.
    pub original_name: String,
    pub status: FileStatus,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    /// Set exactly when the entry enters `Completed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_name: Option<String>,
    /// Set exactly when the entry enters `Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FileEntry {
    pub fn new(id: Uuid, stored_name: String, original_name: String, size_bytes: u64) -> Self {
        FileEntry {
            id,
            stored_name,
            original_name,
            status: FileStatus::Uploaded,
            size_bytes,
            uploaded_at: Utc::now(),
            converted_name: None,
            error_message: None,
        }
    }
}
