//! Sentinel — real-time surveillance danger alerting
//!
//! Drives the per-frame cycle: fetch -> detect -> classify/aggregate ->
//! gate -> notify -> annotate/present, until the source is exhausted or the
//! operator cancels.

pub mod runner;
pub mod settings;

pub use runner::{FrameLoop, LoopOutcome, StopReason};
pub use settings::SentinelConfig;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Fatal pipeline errors. Notification failures are not here: they are
/// recoverable and handled inside the loop.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Source error: {0}")]
    Source(#[from] video_source::SourceError),

    #[error("Detector error: {0}")]
    Detect(#[from] detection::DetectError),
}

/// Initialize tracing output. Call once, from the binary.
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
