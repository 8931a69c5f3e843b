use crate::shared::frame::Frame;
use crate::video::domain::camera::Camera;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Static,
}

/// Where frames come from. The camera handle only exists inside `Live`,
/// so holding a camera outside live mode is unrepresentable.
pub enum FrameSource {
    /// `camera` is `None` when the device could not be opened.
    Live { camera: Option<Box<dyn Camera>> },
    /// `image` is handed out once, then `None`.
    Static { image: Option<Frame> },
}

impl FrameSource {
    pub fn mode(&self) -> Mode {
        match self {
            FrameSource::Live { .. } => Mode::Live,
            FrameSource::Static { .. } => Mode::Static,
        }
    }

    pub fn has_camera(&self) -> bool {
        matches!(self, FrameSource::Live { camera: Some(_) })
    }

    /// Next frame to process, if any. Camera read failures yield `None`.
    pub fn next_frame(&mut self) -> Option<Frame> {
        match self {
            FrameSource::Live { camera: Some(camera) } => match camera.read() {
                Ok(frame) => Some(frame),
                Err(e) => {
                    log::debug!("Skipping tick: {e}");
                    None
                }
            },
            FrameSource::Live { camera: None } => None,
            FrameSource::Static { image } => image.take(),
        }
    }

    /// Releases the camera, if held. Leaves the source camera-less.
    pub fn release_camera(&mut self) {
        if let FrameSource::Live { camera } = self {
            if let Some(mut cam) = camera.take() {
                cam.release();
                log::info!("Camera released");
            }
        }
    }
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        self.release_camera();
    }
}
