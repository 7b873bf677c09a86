//! visio2xml API library
//!
//! This crate provides the HTTP handlers, error mapping, application state,
//! and server setup for the Visio to XML conversion service.

// Module declarations
mod api_doc;
mod handlers;
mod services;

// Public modules
pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
pub use visio2xml_worker::{ConversionQueue, ConversionQueueConfig};
