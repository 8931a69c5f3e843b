use thiserror::Error;

use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("failed to load face model: {0}")]
    ModelLoad(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("unexpected model output: {0}")]
    UnexpectedOutput(String),
}

/// Domain interface for face detection.
///
/// Returns data only; drawing is left to the annotator. Detectors are
/// `&mut self` because inference sessions need mutable access.
pub trait FaceDetector: Send {
    /// Faces with confidence `>= confidence`, in source pixel coordinates.
    fn detect(&mut self, frame: &Frame, confidence: f32) -> Result<Vec<FaceBox>, DetectionError>;
}
