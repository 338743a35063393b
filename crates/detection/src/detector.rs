//! Object detector adapter

use image::imageops::FilterType;
use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use video_source::VideoFrame;

use crate::types::{BoundingBox, Detection};
use crate::DetectError;

/// The opaque detection stage: frame in, detections out. Results below the
/// confidence threshold must not be returned. Errors are fatal to the run.
pub trait Detector {
    fn detect(
        &mut self,
        frame: &VideoFrame,
        confidence_threshold: f32,
    ) -> Result<Vec<Detection>, DetectError>;
}

/// Detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Path to the ONNX model. When absent, a scripted mock detector is used.
    pub model_path: Option<String>,

    /// Class names in model output order. Indices without a name are
    /// reported as "class_<idx>".
    pub class_names: Vec<String>,

    /// Square model input edge (pixels)
    pub input_size: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            class_names: vec!["person".into(), "knife".into(), "scissors".into()],
            input_size: 640,
        }
    }
}

/// ONNX-backed YOLO-style detector.
///
/// Without a configured model it falls back to a scripted mock that emits a
/// person every frame and a knife every 50th frame, so the alert path can be
/// exercised end to end with the synthetic source.
pub struct OnnxDetector {
    config: DetectorConfig,
    session: Option<Session>,
}

impl OnnxDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, DetectError> {
        let session = if let Some(path) = &config.model_path {
            info!("Loading detection model from {}", path);
            let session = Session::builder()
                .map_err(|e| DetectError::ModelLoad(e.to_string()))?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .map_err(|e| DetectError::ModelLoad(e.to_string()))?
                .commit_from_file(path)
                .map_err(|e| DetectError::ModelLoad(e.to_string()))?;
            Some(session)
        } else {
            warn!("No model path configured. Using mock detector.");
            None
        };

        Ok(Self { config, session })
    }

    fn class_name(&self, idx: usize) -> String {
        self.config
            .class_names
            .get(idx)
            .cloned()
            .unwrap_or_else(|| format!("class_{idx}"))
    }

    fn infer(
        &self,
        session: &mut Session,
        frame: &VideoFrame,
        confidence_threshold: f32,
    ) -> Result<Vec<Detection>, DetectError> {
        let size = self.config.input_size;

        let img = frame
            .to_image()
            .ok_or_else(|| DetectError::ImageProcessing("frame buffer size mismatch".into()))?;
        let resized = image::imageops::resize(&img, size, size, FilterType::Triangle);

        // 1x3xSxS tensor, 0..1 normalization
        let mut input = Array4::<f32>::zeros((1, 3, size as usize, size as usize));
        for (x, y, pixel) in resized.enumerate_pixels() {
            input[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
            input[[0, 1, y as usize, x as usize]] = pixel[1] as f32 / 255.0;
            input[[0, 2, y as usize, x as usize]] = pixel[2] as f32 / 255.0;
        }

        let input = Tensor::from_array(input).map_err(|e| DetectError::Inference(e.to_string()))?;
        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| DetectError::Inference(e.to_string()))?;

        // YOLOv8 layout: 1 x (4 + num_classes) x num_anchors, cxcywh in
        // input-image coordinates
        let output = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| DetectError::Inference(e.to_string()))?;
        let shape = output.shape().to_vec();
        if shape.len() != 3 || shape[1] < 5 {
            return Err(DetectError::Inference(format!(
                "unexpected output shape {shape:?}"
            )));
        }

        let num_classes = shape[1] - 4;
        let num_anchors = shape[2];
        let x_scale = frame.width as f32 / size as f32;
        let y_scale = frame.height as f32 / size as f32;

        let mut detections = Vec::new();
        for a in 0..num_anchors {
            let mut best_class = 0;
            let mut best_score = 0.0f32;
            for c in 0..num_classes {
                let score = output[[0, 4 + c, a]];
                if score > best_score {
                    best_score = score;
                    best_class = c;
                }
            }
            if best_score < confidence_threshold {
                continue;
            }

            let cx = output[[0, 0, a]] * x_scale;
            let cy = output[[0, 1, a]] * y_scale;
            let w = output[[0, 2, a]] * x_scale;
            let h = output[[0, 3, a]] * y_scale;

            detections.push(Detection::new(
                self.class_name(best_class),
                best_score,
                BoundingBox::new(
                    (cx - w / 2.0) as i32,
                    (cy - h / 2.0) as i32,
                    (cx + w / 2.0) as i32,
                    (cy + h / 2.0) as i32,
                ),
            ));
        }

        Ok(detections)
    }

    fn mock(&self, frame: &VideoFrame, confidence_threshold: f32) -> Vec<Detection> {
        let w = frame.width as i32;
        let h = frame.height as i32;

        let mut detections = vec![Detection::new(
            "person",
            0.91,
            BoundingBox::new(w / 10, h / 8, w / 2, h - h / 8),
        )];

        if frame.sequence % 50 == 0 {
            detections.push(Detection::new(
                "knife",
                0.78,
                BoundingBox::new(w / 2, h / 3, w / 2 + w / 6, h / 2),
            ));
        }

        detections.retain(|d| d.confidence >= confidence_threshold);
        detections
    }
}

impl Detector for OnnxDetector {
    fn detect(
        &mut self,
        frame: &VideoFrame,
        confidence_threshold: f32,
    ) -> Result<Vec<Detection>, DetectError> {
        match self.session.take() {
            Some(mut session) => {
                let result = self.infer(&mut session, frame, confidence_threshold);
                self.session = Some(session);
                result
            }
            None => Ok(self.mock(frame, confidence_threshold)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_detector_respects_threshold() {
        let mut detector = OnnxDetector::new(DetectorConfig::default()).unwrap();
        let frame = VideoFrame::blank(640, 480, 1);

        let detections = detector.detect(&frame, 0.25).unwrap();
        assert!(detections.iter().all(|d| d.confidence >= 0.25));

        let detections = detector.detect(&frame, 0.95).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn mock_detector_emits_knife_periodically() {
        let mut detector = OnnxDetector::new(DetectorConfig::default()).unwrap();

        let with_knife = detector
            .detect(&VideoFrame::blank(640, 480, 50), 0.25)
            .unwrap();
        assert!(with_knife.iter().any(|d| d.label == "knife"));

        let without = detector
            .detect(&VideoFrame::blank(640, 480, 51), 0.25)
            .unwrap();
        assert!(without.iter().all(|d| d.label != "knife"));
    }

    #[test]
    fn missing_model_file_is_fatal() {
        let config = DetectorConfig {
            model_path: Some("/nonexistent/model.onnx".into()),
            ..Default::default()
        };
        assert!(matches!(
            OnnxDetector::new(config),
            Err(DetectError::ModelLoad(_))
        ));
    }
}
