use crate::annotation::box_annotator::annotate;
use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Detect → annotate for one frame.
pub struct HighlightFacesUseCase {
    detector: Box<dyn FaceDetector>,
    confidence: f32,
}

impl HighlightFacesUseCase {
    pub fn new(detector: Box<dyn FaceDetector>, confidence: f32) -> Self {
        Self {
            detector,
            confidence,
        }
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Returns an annotated copy of `frame` together with the faces drawn on it.
    pub fn execute(&mut self, frame: &Frame) -> Result<(Frame, Vec<FaceBox>), DetectionError> {
        let faces = self.detector.detect(frame, self.confidence)?;
        Ok((annotate(frame, &faces), faces))
    }
}
