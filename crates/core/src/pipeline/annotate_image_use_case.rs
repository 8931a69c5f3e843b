use std::path::Path;

use crate::pipeline::highlight_faces_use_case::HighlightFacesUseCase;
use crate::shared::face_box::FaceBox;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::infrastructure::image_file_reader::read_image;

/// Single-image pipeline: read → detect → annotate → (optionally) write.
pub struct AnnotateImageUseCase {
    highlighter: HighlightFacesUseCase,
    image_writer: Box<dyn ImageWriter>,
}

impl AnnotateImageUseCase {
    pub fn new(highlighter: HighlightFacesUseCase, image_writer: Box<dyn ImageWriter>) -> Self {
        Self {
            highlighter,
            image_writer,
        }
    }

    /// Returns the detected faces. The annotated image is only written
    /// when `output_path` is given.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let frame = read_image(input_path)?;
        let (annotated, faces) = self.highlighter.execute(&frame)?;
        log::info!(
            "Found {} face(s) in {} at confidence >= {}",
            faces.len(),
            input_path.display(),
            self.highlighter.confidence()
        );

        if let Some(path) = output_path {
            self.image_writer.write(path, &annotated)?;
        }
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
    use crate::shared::frame::Frame;
    use std::sync::{Arc, Mutex};

    struct StubDetector(Vec<FaceBox>);

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _: &Frame, confidence: f32) -> Result<Vec<FaceBox>, DetectionError> {
            Ok(self
                .0
                .iter()
                .copied()
                .filter(|f| f.confidence >= confidence)
                .collect())
        }
    }

    #[derive(Clone, Default)]
    struct StubImageWriter {
        written: Arc<Mutex<Vec<(std::path::PathBuf, Frame)>>>,
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    fn use_case(faces: Vec<FaceBox>, writer: StubImageWriter) -> AnnotateImageUseCase {
        AnnotateImageUseCase::new(
            HighlightFacesUseCase::new(Box::new(StubDetector(faces)), 0.6),
            Box::new(writer),
        )
    }

    fn input_image(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("in.png");
        image::RgbImage::from_pixel(64, 64, image::Rgb([30, 30, 30]))
            .save(&path)
            .unwrap();
        path
    }

    fn face(confidence: f32) -> FaceBox {
        FaceBox {
            left: 5,
            top: 20,
            right: 40,
            bottom: 50,
            confidence,
        }
    }

    #[test]
    fn test_writes_annotated_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_image(dir.path());
        let output = dir.path().join("out.png");
        let writer = StubImageWriter::default();

        let faces = use_case(vec![face(0.95), face(0.2)], writer.clone())
            .execute(&input, Some(output.as_path()))
            .unwrap();

        assert_eq!(faces, vec![face(0.95)]);
        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, output);
        assert_ne!(written[0].1.pixel(5, 20), [30, 30, 30]);
    }

    #[test]
    fn test_without_output_path_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_image(dir.path());
        let writer = StubImageWriter::default();
        let faces = use_case(vec![face(0.9)], writer.clone())
            .execute(&input, None)
            .unwrap();
        assert_eq!(faces.len(), 1);
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let result = use_case(vec![], StubImageWriter::default()).execute(&missing, None);
        assert!(result.is_err());
    }
}
