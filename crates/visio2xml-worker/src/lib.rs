//! visio2xml worker library
//!
//! The asynchronous half of the conversion lifecycle: [`ConversionQueue`]
//! accepts jobs from the API without blocking it, and [`ConversionPipeline`]
//! executes them (read, parse, render, write artifact) while keeping the file
//! registry's state machine honest - every job ends in `Completed` or
//! `Failed`, never stuck at `Converting`.

pub mod pipeline;
pub mod queue;

pub use pipeline::{ConversionJob, ConversionPipeline};
pub use queue::{ConversionQueue, ConversionQueueConfig};
