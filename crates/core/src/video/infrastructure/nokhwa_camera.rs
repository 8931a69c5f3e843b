use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};

use crate::shared::frame::Frame;
use crate::video::domain::camera::{Camera, CameraOpener, CaptureError};

/// System camera opened through `nokhwa`, decoded to RGB.
pub struct NokhwaCamera {
    inner: nokhwa::Camera,
    streaming: bool,
}

impl NokhwaCamera {
    pub fn open(index: u32) -> Result<Self, CaptureError> {
        let open_err = |e: nokhwa::NokhwaError| CaptureError::CameraOpen {
            index,
            reason: e.to_string(),
        };
        let format =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut inner = nokhwa::Camera::new(CameraIndex::Index(index), format).map_err(open_err)?;
        inner.open_stream().map_err(open_err)?;

        let resolution = inner.resolution();
        log::info!(
            "Opened camera {index} ({}) at {}x{}",
            inner.info().human_name(),
            resolution.width(),
            resolution.height()
        );
        Ok(Self {
            inner,
            streaming: true,
        })
    }
}

impl Camera for NokhwaCamera {
    fn read(&mut self) -> Result<Frame, CaptureError> {
        if !self.streaming {
            return Err(CaptureError::CameraRead("camera released".into()));
        }
        let buffer = self
            .inner
            .frame()
            .map_err(|e| CaptureError::CameraRead(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::CameraRead(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());
        Ok(Frame::new(decoded.into_raw(), width, height))
    }

    fn release(&mut self) {
        if !self.streaming {
            return;
        }
        self.streaming = false;
        if let Err(e) = self.inner.stop_stream() {
            log::warn!("Failed to stop camera stream: {e}");
        }
    }
}

impl Drop for NokhwaCamera {
    fn drop(&mut self) {
        self.release();
    }
}

/// Opens [`NokhwaCamera`]s.
#[derive(Default)]
pub struct NokhwaCameraOpener;

impl CameraOpener for NokhwaCameraOpener {
    fn open(&mut self, index: u32) -> Result<Box<dyn Camera>, CaptureError> {
        Ok(Box::new(NokhwaCamera::open(index)?))
    }
}
