//! Video frame type and pixel access

/// Decoded RGB video frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (nanoseconds)
    pub timestamp_ns: u64,
    /// Frame sequence number
    pub sequence: u32,
}

impl VideoFrame {
    /// Create a new video frame from raw RGB data
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp_ns: u64, sequence: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp_ns,
            sequence,
        }
    }

    /// Create a black frame of the given dimensions
    pub fn blank(width: u32, height: u32, sequence: u32) -> Self {
        Self {
            data: vec![0u8; (width * height * 3) as usize],
            width,
            height,
            timestamp_ns: 0,
            sequence,
        }
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Set pixel at (x, y); out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        self.data[idx] = rgb[0];
        self.data[idx + 1] = rgb[1];
        self.data[idx + 2] = rgb[2];
    }

    /// Convert to an owned RGB image buffer
    pub fn to_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_roundtrip() {
        let mut frame = VideoFrame::blank(8, 4, 0);
        frame.set_pixel(3, 2, [10, 20, 30]);
        assert_eq!(frame.get_pixel(3, 2), Some([10, 20, 30]));
        assert_eq!(frame.get_pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn out_of_bounds_access() {
        let mut frame = VideoFrame::blank(8, 4, 0);
        assert_eq!(frame.get_pixel(8, 0), None);
        assert_eq!(frame.get_pixel(0, 4), None);
        // Writes outside the frame are dropped, not panics
        frame.set_pixel(100, 100, [255, 255, 255]);
    }
}
