//! Danger Detection
//!
//! Object detection and the frame-level danger decision:
//! - `Detector` trait plus an ONNX (YOLO-style) adapter
//! - Danger classification against a configured label set
//! - Per-frame aggregation into a verdict and run-wide counters

pub mod aggregate;
pub mod danger;
pub mod detector;
pub mod types;

pub use aggregate::{aggregate, FrameVerdict, RunCounters};
pub use danger::DangerSet;
pub use detector::{Detector, DetectorConfig, OnnxDetector};
pub use types::{BoundingBox, Detection};

use thiserror::Error;

/// Detection error types
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),
}
