//! Detection result types

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }
}

/// One object instance found in a frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Class label as reported by the model
    pub label: String,

    /// Detection confidence in [0, 1]
    pub confidence: f32,

    /// Bounding box in frame pixel coordinates
    pub bbox: BoundingBox,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_dimensions() {
        let bbox = BoundingBox::new(10, 20, 110, 70);
        assert_eq!(bbox.width(), 100);
        assert_eq!(bbox.height(), 50);
    }

    #[test]
    fn degenerate_bbox_clamps_to_zero() {
        let bbox = BoundingBox::new(50, 50, 10, 10);
        assert_eq!(bbox.width(), 0);
        assert_eq!(bbox.height(), 0);
    }
}
