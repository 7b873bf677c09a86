//! Application setup: storage roots, conversion pipeline, routes, and server.

pub mod routes;
pub mod server;

use anyhow::Result;
use axum::Router;
use std::sync::Arc;

use visio2xml_convert::{DocumentParser, VisioParser, VisioXmlRenderer, XmlRenderer};
use visio2xml_core::{Config, FileRegistry, InMemoryRegistry};
use visio2xml_storage::{LocalStorage, Storage};
use visio2xml_worker::{ConversionPipeline, ConversionQueue, ConversionQueueConfig};

use crate::state::AppState;

/// Build the application with its default collaborators: in-memory registry,
/// local filesystem storage roots, and the bundled parser and renderer.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let registry: Arc<dyn FileRegistry> = Arc::new(InMemoryRegistry::new());
    let uploads: Arc<dyn Storage> = Arc::new(LocalStorage::new(config.upload_dir.clone()).await?);
    let outputs: Arc<dyn Storage> = Arc::new(LocalStorage::new(config.output_dir.clone()).await?);
    let parser: Arc<dyn DocumentParser> = Arc::new(VisioParser::new());
    let renderer: Arc<dyn XmlRenderer> = Arc::new(VisioXmlRenderer::new());

    build_app(config, registry, uploads, outputs, parser, renderer)
}

/// Assemble the app from explicit collaborators.
///
/// Tests use this to inject a fake registry, storage, or a failing parser
/// without touching the router wiring.
pub fn build_app(
    config: Config,
    registry: Arc<dyn FileRegistry>,
    uploads: Arc<dyn Storage>,
    outputs: Arc<dyn Storage>,
    parser: Arc<dyn DocumentParser>,
    renderer: Arc<dyn XmlRenderer>,
) -> Result<(Arc<AppState>, Router)> {
    let pipeline = Arc::new(ConversionPipeline::new(
        registry.clone(),
        uploads.clone(),
        outputs.clone(),
        parser,
        renderer,
    ));
    let queue = ConversionQueue::new(
        ConversionQueueConfig {
            max_workers: config.conversion_max_workers,
            queue_capacity: config.conversion_queue_capacity,
        },
        pipeline,
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        registry,
        uploads,
        outputs,
        queue,
    });
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
