pub const FACE_MODEL_NAME: &str = "opencv_face_detector.onnx";

/// Application directory name under the platform data/config dirs.
pub const APP_DIR_NAME: &str = "FaceRecognition";

/// Default minimum detection confidence.
pub const DEFAULT_CONFIDENCE: f32 = 0.6;

/// Camera polling interval in live mode.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 30;

pub const DEFAULT_CAMERA_INDEX: u32 = 0;

/// Extensions offered by the image picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Shown in place of an image that could not be decoded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load image";

pub const CAMERA_UNAVAILABLE_MESSAGE: &str = "Camera unavailable";
