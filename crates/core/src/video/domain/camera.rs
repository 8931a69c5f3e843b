use std::path::PathBuf;

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to open camera {index}: {reason}")]
    CameraOpen { index: u32, reason: String },
    #[error("camera read failed: {0}")]
    CameraRead(String),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// An open camera handle.
pub trait Camera {
    /// Grabs the next frame. A failure means "no frame this time", not
    /// that the handle is dead.
    fn read(&mut self) -> Result<Frame, CaptureError>;

    /// Stops the stream and frees the device. Safe to call repeatedly.
    fn release(&mut self);
}

/// Acquires camera handles by device index.
pub trait CameraOpener {
    fn open(&mut self, index: u32) -> Result<Box<dyn Camera>, CaptureError>;
}
