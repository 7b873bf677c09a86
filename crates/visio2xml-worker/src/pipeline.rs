//! The conversion worker.
//!
//! One pipeline run per job: read the raw upload, parse it into the
//! structural model, render the XML artifact, write it to the outputs root,
//! and record the terminal transition on the registry entry. Every failure is
//! caught and recorded; nothing escapes a worker run.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use visio2xml_convert::{DocumentFormat, DocumentParser, ParseError, RenderError, XmlRenderer};
use visio2xml_core::FileRegistry;
use visio2xml_core::models::FileEntry;
use visio2xml_storage::{keys, Storage, StorageError};

/// A unit of conversion work, submitted after the entry has transitioned to
/// `Converting`.
#[derive(Debug, Clone, Copy)]
pub struct ConversionJob {
    pub file_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
enum PipelineError {
    #[error("Failed to parse Visio file: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to generate XML: {0}")]
    Render(#[from] RenderError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("conversion worker error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Message recorded on the entry. Parse/render causes are kept for the
    /// caller to read back; storage and internal causes are not leaked.
    fn failure_message(&self) -> String {
        match self {
            PipelineError::Parse(_) | PipelineError::Render(_) => self.to_string(),
            PipelineError::Storage(_) => "Storage error during conversion".to_string(),
            PipelineError::Internal(_) => "Conversion failed unexpectedly".to_string(),
        }
    }
}

/// Executes conversion jobs against the registry and the two storage roots.
pub struct ConversionPipeline {
    registry: Arc<dyn FileRegistry>,
    uploads: Arc<dyn Storage>,
    outputs: Arc<dyn Storage>,
    parser: Arc<dyn DocumentParser>,
    renderer: Arc<dyn XmlRenderer>,
}

impl ConversionPipeline {
    pub fn new(
        registry: Arc<dyn FileRegistry>,
        uploads: Arc<dyn Storage>,
        outputs: Arc<dyn Storage>,
        parser: Arc<dyn DocumentParser>,
        renderer: Arc<dyn XmlRenderer>,
    ) -> Self {
        Self {
            registry,
            uploads,
            outputs,
            parser,
            renderer,
        }
    }

    /// Run one job to a terminal state.
    ///
    /// The entry is re-read first: a delete that won the race simply ends the
    /// job. On success the entry moves to `Completed` with the artifact name;
    /// on any failure it moves to `Failed` with a human-readable reason.
    pub async fn run(&self, job: ConversionJob) {
        let entry = match self.registry.get(job.file_id).await {
            Ok(entry) => entry,
            Err(_) => {
                tracing::debug!(file_id = %job.file_id, "Entry deleted before conversion started");
                return;
            }
        };

        let start = std::time::Instant::now();
        match self.convert(&entry).await {
            Ok(artifact_name) => {
                if let Err(e) = self
                    .registry
                    .complete_conversion(entry.id, artifact_name.clone())
                    .await
                {
                    tracing::error!(file_id = %entry.id, error = %e, "Failed to record completion");
                    return;
                }
                tracing::info!(
                    file_id = %entry.id,
                    artifact = %artifact_name,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Conversion completed"
                );
            }
            Err(e) => {
                tracing::warn!(file_id = %entry.id, error = %e, "Conversion failed");
                if let Err(update_err) = self
                    .registry
                    .fail_conversion(entry.id, e.failure_message())
                    .await
                {
                    tracing::error!(
                        file_id = %entry.id,
                        error = %update_err,
                        "Failed to record conversion failure"
                    );
                }
            }
        }
    }

    async fn convert(&self, entry: &FileEntry) -> Result<String, PipelineError> {
        let data = self.uploads.get(&entry.stored_name).await?;

        let format = stored_format(&entry.stored_name)?;

        // Parsing is CPU-bound; keep it off the async workers.
        let parser = self.parser.clone();
        let document = tokio::task::spawn_blocking(move || parser.parse(&data, format))
            .await
            .map_err(|e| PipelineError::Internal(format!("parser task panicked: {e}")))??;

        let xml = self
            .renderer
            .render(&document, &entry.original_name, Utc::now())?;

        let artifact_name = keys::artifact_key(entry.id);
        self.outputs
            .put(&artifact_name, xml.into_bytes())
            .await?;

        Ok(artifact_name)
    }
}

fn stored_format(stored_name: &str) -> Result<DocumentFormat, PipelineError> {
    Path::new(stored_name)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(DocumentFormat::from_extension)
        .ok_or_else(|| {
            PipelineError::Parse(ParseError::UnsupportedFormat(stored_name.to_string()))
        })
}
