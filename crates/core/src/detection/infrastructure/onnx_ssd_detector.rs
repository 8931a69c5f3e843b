/// SSD face detector (OpenCV's ResNet-10 face model, ONNX export) run
/// through ONNX Runtime via `ort`.
///
/// Handles blob preprocessing, inference and output readout. Drawing is
/// the annotator's job.
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};

use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::detection::domain::ssd_output::{parse_detections, SSD_ROW_LEN};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Square input resolution the network was trained on.
pub const SSD_INPUT_SIZE: u32 = 300;

/// Per-channel mean subtracted from the input, in R, G, B order.
pub const SSD_MEAN: [f32; 3] = [104.0, 117.0, 123.0];

pub struct OnnxSsdDetector {
    session: ort::session::Session,
}

impl OnnxSsdDetector {
    /// Load the ONNX model. Any failure here is unrecoverable for callers:
    /// without a network there is nothing to detect with.
    pub fn new(model_path: &Path) -> Result<Self, DetectionError> {
        let session = ort::session::Session::builder()
            .map_err(|e| load_error(model_path, e))?
            .commit_from_file(model_path)
            .map_err(|e| load_error(model_path, e))?;
        log::info!("Loaded face model from {}", model_path.display());
        Ok(Self { session })
    }
}

impl FaceDetector for OnnxSsdDetector {
    fn detect(&mut self, frame: &Frame, confidence: f32) -> Result<Vec<FaceBox>, DetectionError> {
        let blob = blob_from_frame(frame)?;

        let input = ort::value::Tensor::from_array(blob)
            .map_err(|e| DetectionError::Inference(e.to_string()))?;
        let outputs = self
            .session
            .run(ort::inputs![input])
            .map_err(|e| DetectionError::Inference(e.to_string()))?;
        if outputs.len() == 0 {
            return Err(DetectionError::UnexpectedOutput(
                "model produced no outputs".into(),
            ));
        }
        let tensor = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| DetectionError::UnexpectedOutput(e.to_string()))?;

        // DetectionOutput layout: [1, 1, N, 7]
        let shape = tensor.shape();
        if shape.last() != Some(&SSD_ROW_LEN) {
            return Err(DetectionError::UnexpectedOutput(format!(
                "expected rows of {SSD_ROW_LEN} values, got shape {shape:?}"
            )));
        }
        let data = tensor.as_slice().ok_or_else(|| {
            DetectionError::UnexpectedOutput("output tensor is not contiguous".into())
        })?;

        Ok(parse_detections(
            data,
            confidence,
            frame.width(),
            frame.height(),
        ))
    }
}

fn load_error(path: &Path, e: impl std::fmt::Display) -> DetectionError {
    DetectionError::ModelLoad(format!("{}: {e}", path.display()))
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Build the network input: bilinear resize to 300×300, mean subtraction,
/// NCHW float32 with channels in R, G, B order. No crop, no scaling.
fn blob_from_frame(frame: &Frame) -> Result<ndarray::Array4<f32>, DetectionError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(DetectionError::Inference("empty frame".into()));
    }
    let src = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(frame.width(), frame.height(), frame.data())
        .ok_or_else(|| DetectionError::Inference("frame buffer too small".into()))?;
    let resized = imageops::resize(&src, SSD_INPUT_SIZE, SSD_INPUT_SIZE, FilterType::Triangle);

    let size = SSD_INPUT_SIZE as usize;
    let mut blob = ndarray::Array4::<f32>::zeros((1, 3, size, size));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            blob[[0, c, y as usize, x as usize]] = pixel.0[c] as f32 - SSD_MEAN[c];
        }
    }
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_blob_shape_is_fixed() {
        let frame = Frame::filled(640, 480, [0, 0, 0]);
        let blob = blob_from_frame(&frame).unwrap();
        assert_eq!(blob.shape(), &[1, 3, 300, 300]);
    }

    #[test]
    fn test_blob_subtracts_channel_mean() {
        let frame = Frame::filled(120, 90, [200, 117, 23]);
        let blob = blob_from_frame(&frame).unwrap();
        for (y, x) in [(0, 0), (150, 150), (299, 299)] {
            assert_relative_eq!(blob[[0, 0, y, x]], 96.0);
            assert_relative_eq!(blob[[0, 1, y, x]], 0.0);
            assert_relative_eq!(blob[[0, 2, y, x]], -100.0);
        }
    }

    #[test]
    fn test_blob_stretches_without_crop() {
        // Left half red, right half blue: the split must stay centered
        // after a non-uniform resize.
        let (w, h) = (200u32, 50u32);
        let mut img = image::RgbImage::new(w, h);
        for (x, _, px) in img.enumerate_pixels_mut() {
            *px = if x < w / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            };
        }
        let blob = blob_from_frame(&Frame::from_rgb_image(img)).unwrap();
        assert_relative_eq!(blob[[0, 0, 150, 10]], 255.0 - SSD_MEAN[0]);
        assert_relative_eq!(blob[[0, 2, 150, 290]], 255.0 - SSD_MEAN[2]);
    }

    #[test]
    fn test_blob_rejects_empty_frame() {
        let frame = Frame::new(Vec::new(), 0, 0);
        assert!(blob_from_frame(&frame).is_err());
    }

    #[test]
    fn test_missing_model_fails_to_load() {
        let result = OnnxSsdDetector::new(Path::new("/nonexistent/face.onnx"));
        assert!(matches!(result, Err(DetectionError::ModelLoad(_))));
    }

    #[test]
    fn test_malformed_model_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.onnx");
        std::fs::write(&path, b"definitely not protobuf").unwrap();
        assert!(matches!(
            OnnxSsdDetector::new(&path),
            Err(DetectionError::ModelLoad(_))
        ));
    }
}
