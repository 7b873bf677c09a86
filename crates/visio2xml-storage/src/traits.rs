//! Storage abstraction trait
//!
//! This module defines the Storage trait that storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

use visio2xml_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// Whether this error means the key simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Backends persist opaque byte blobs under flat keys. The conversion
/// pipeline and HTTP handlers work against this trait so durable storage can
/// be swapped (or faked in tests) without touching callers.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under `key`, replacing any existing blob.
    async fn put(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read the blob stored under `key`.
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete the blob under `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a blob exists under `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Size in bytes of the blob under `key`, if it exists.
    async fn content_length(&self, key: &str) -> StorageResult<u64>;
}
