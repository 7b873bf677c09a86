//! visio2xml core library
//!
//! This crate provides the domain models, error types, configuration,
//! validation policy, and the file registry shared across all visio2xml
//! components.

pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult, ErrorMetadata, LogLevel};
pub use models::{
    ConversionResponse, DeleteResponse, FileEntry, FileListResponse, FileStatus, StatusResponse,
    UploadResponse,
};
pub use registry::{FileRegistry, InMemoryRegistry};
pub use validation::{UploadValidator, ValidationError};
