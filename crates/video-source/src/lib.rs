//! Video Source Library
//!
//! Provides the frame type shared across the pipeline plus concrete
//! frame sources and sinks:
//! - Synthetic source (deterministic generated frames) for smoke runs and tests
//! - Image-directory source for file-backed input
//! - PNG-directory and null sinks for annotated output

pub mod frame;
pub mod sink;
pub mod source;

pub use frame::VideoFrame;
pub use sink::{FrameSink, NullSink, PngDirSink};
pub use source::{open_source, FrameSource, ImageDirSource, SyntheticSource};

use thiserror::Error;

/// Source/sink error types
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open source: {0}")]
    Open(String),

    #[error("Invalid frame data: {0}")]
    Format(String),

    #[error("Failed to read frame: {0}")]
    Read(String),

    #[error("Failed to write frame: {0}")]
    Write(String),
}
