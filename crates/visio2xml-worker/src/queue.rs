//! Conversion queue: bounded submission channel and a semaphore-capped
//! worker pool.
//!
//! Shutdown: [`ConversionQueue::shutdown`] signals the pool to stop claiming
//! jobs; it does not wait for in-flight conversions. For graceful shutdown,
//! coordinate with your runtime and allow time for running jobs to finish
//! before process exit.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

use crate::pipeline::{ConversionJob, ConversionPipeline};

#[derive(Debug, Clone)]
pub struct ConversionQueueConfig {
    /// Maximum conversions running at once.
    pub max_workers: usize,
    /// Jobs buffered between acceptance and execution; submitters wait when
    /// the buffer is full.
    pub queue_capacity: usize,
}

impl Default for ConversionQueueConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            queue_capacity: 256,
        }
    }
}

pub struct ConversionQueue {
    job_tx: mpsc::Sender<ConversionJob>,
    shutdown_tx: mpsc::Sender<()>,
}

impl ConversionQueue {
    /// Create the queue and spawn its worker pool.
    pub fn new(config: ConversionQueueConfig, pipeline: Arc<ConversionPipeline>) -> Self {
        let (job_tx, job_rx) = mpsc::channel(config.queue_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(Self::worker_pool(config, pipeline, job_rx, shutdown_rx));

        Self {
            job_tx,
            shutdown_tx,
        }
    }

    /// Submit a job for asynchronous execution.
    ///
    /// The caller must have applied the `Uploaded -> Converting` transition
    /// already; submission only hands the work to the pool. Waits when the
    /// buffer is full, errors only when the pool is shut down.
    pub async fn submit(&self, job: ConversionJob) -> Result<()> {
        self.job_tx
            .send(job)
            .await
            .map_err(|_| anyhow::anyhow!("conversion queue is shut down"))?;

        tracing::info!(file_id = %job.file_id, "Conversion job submitted to queue");
        Ok(())
    }

    /// Signal the worker pool to stop claiming jobs.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }

    async fn worker_pool(
        config: ConversionQueueConfig,
        pipeline: Arc<ConversionPipeline>,
        mut job_rx: mpsc::Receiver<ConversionJob>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!(
            max_workers = config.max_workers,
            queue_capacity = config.queue_capacity,
            "Conversion worker pool started"
        );

        let semaphore = Arc::new(Semaphore::new(config.max_workers.max(1)));

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("Conversion worker pool shutting down");
                    break;
                }
                job = job_rx.recv() => {
                    let Some(job) = job else { break };

                    let permit = match semaphore.clone().acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => break,
                    };

                    // Each job runs on its own task; conversions for
                    // different ids never block one another.
                    let pipeline = pipeline.clone();
                    tokio::spawn(async move {
                        let _permit = permit;
                        pipeline.run(job).await;
                    });
                }
            }
        }

        tracing::info!("Conversion worker pool stopped");
    }
}
