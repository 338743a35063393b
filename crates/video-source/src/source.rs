//! Frame sources

use std::path::{Path, PathBuf};

use tracing::info;

use crate::frame::VideoFrame;
use crate::SourceError;

/// A pull-based frame source. `Ok(None)` signals normal end-of-stream.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, SourceError>;
}

/// Deterministic generated frames, for smoke runs and tests
pub struct SyntheticSource {
    width: u32,
    height: u32,
    remaining: u32,
    sequence: u32,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32, frame_count: u32) -> Self {
        Self {
            width,
            height,
            remaining: frame_count,
            sequence: 0,
        }
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, SourceError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let mut frame = VideoFrame::blank(self.width, self.height, self.sequence);
        // Horizontal gradient keyed to the sequence number so consecutive
        // frames are distinguishable in a sink
        for y in 0..self.height {
            for x in 0..self.width {
                let v = ((x * 255 / self.width.max(1)) as u8).wrapping_add(self.sequence as u8);
                frame.set_pixel(x, y, [v, v / 2, 64]);
            }
        }
        frame.timestamp_ns = self.sequence as u64 * 33_000_000; // ~30fps
        self.sequence += 1;
        Ok(Some(frame))
    }
}

/// Reads a directory of still images in lexicographic order
#[derive(Debug)]
pub struct ImageDirSource {
    files: Vec<PathBuf>,
    index: usize,
    sequence: u32,
}

impl ImageDirSource {
    pub fn open(dir: &Path) -> Result<Self, SourceError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| SourceError::Open(format!("{}: {e}", dir.display())))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("png" | "jpg" | "jpeg" | "bmp")
                )
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(SourceError::Open(format!(
                "no image files in {}",
                dir.display()
            )));
        }

        info!("Opened image directory source: {} frames", files.len());
        Ok(Self {
            files,
            index: 0,
            sequence: 0,
        })
    }
}

impl FrameSource for ImageDirSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, SourceError> {
        let Some(path) = self.files.get(self.index) else {
            return Ok(None);
        };
        self.index += 1;

        let img = image::open(path)
            .map_err(|e| SourceError::Read(format!("{}: {e}", path.display())))?
            .to_rgb8();

        let frame = VideoFrame::new(
            img.as_raw().clone(),
            img.width(),
            img.height(),
            0,
            self.sequence,
        );
        self.sequence += 1;
        Ok(Some(frame))
    }
}

/// Resolve a configured source identifier into a concrete source.
///
/// `synthetic` or `synthetic:<frames>` produce generated frames; anything else
/// is treated as a directory of still images.
pub fn open_source(identifier: &str) -> Result<Box<dyn FrameSource + Send>, SourceError> {
    if identifier == "synthetic" {
        return Ok(Box::new(SyntheticSource::new(640, 480, 300)));
    }
    if let Some(count) = identifier.strip_prefix("synthetic:") {
        let frames: u32 = count
            .parse()
            .map_err(|_| SourceError::Open(format!("bad synthetic frame count: {count}")))?;
        return Ok(Box::new(SyntheticSource::new(640, 480, frames)));
    }
    Ok(Box::new(ImageDirSource::open(Path::new(identifier))?))
}
