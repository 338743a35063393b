//! Frame sinks for annotated output

use std::path::PathBuf;

use tracing::debug;

use crate::frame::VideoFrame;
use crate::SourceError;

/// Receives each annotated frame. Presentation must not affect the pipeline.
pub trait FrameSink {
    fn present(&mut self, frame: &VideoFrame) -> Result<(), SourceError>;
}

/// Discards frames (headless runs)
#[derive(Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &VideoFrame) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Writes each frame as a numbered PNG into a directory
pub struct PngDirSink {
    dir: PathBuf,
    written: u64,
}

impl PngDirSink {
    pub fn create(dir: PathBuf) -> Result<Self, SourceError> {
        std::fs::create_dir_all(&dir)
            .map_err(|e| SourceError::Open(format!("{}: {e}", dir.display())))?;
        Ok(Self { dir, written: 0 })
    }

    /// Number of frames written so far
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngDirSink {
    fn present(&mut self, frame: &VideoFrame) -> Result<(), SourceError> {
        let img = frame
            .to_image()
            .ok_or_else(|| SourceError::Format("frame buffer size mismatch".into()))?;
        let path = self.dir.join(format!("frame_{:06}.png", frame.sequence));
        img.save(&path)
            .map_err(|e| SourceError::Write(format!("{}: {e}", path.display())))?;
        self.written += 1;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_accepts_everything() {
        let mut sink = NullSink;
        let frame = VideoFrame::blank(4, 4, 0);
        assert!(sink.present(&frame).is_ok());
    }
}
