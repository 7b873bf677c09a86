//! Application state.
//!
//! One shared state object behind an `Arc`: configuration, the file registry,
//! the two storage roots, and the conversion queue. The registry and storage
//! are trait objects so tests can inject fakes without rebuilding the router
//! code.

use std::sync::Arc;

use visio2xml_core::{Config, FileRegistry};
use visio2xml_storage::Storage;
use visio2xml_worker::ConversionQueue;

pub struct AppState {
    pub config: Config,
    pub registry: Arc<dyn FileRegistry>,
    /// Durable storage for raw uploads (`{id}.{ext}` keys).
    pub uploads: Arc<dyn Storage>,
    /// Durable storage for converted artifacts (`{id}.xml` keys).
    pub outputs: Arc<dyn Storage>,
    pub queue: ConversionQueue,
}
