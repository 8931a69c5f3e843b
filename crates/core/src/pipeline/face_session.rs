use std::path::Path;
use std::time::Duration;

use crate::pipeline::display_surface::DisplaySurface;
use crate::pipeline::highlight_faces_use_case::HighlightFacesUseCase;
use crate::shared::constants::{
    CAMERA_UNAVAILABLE_MESSAGE, DEFAULT_CAMERA_INDEX, DEFAULT_CONFIDENCE,
    DEFAULT_TICK_INTERVAL_MS, LOAD_FAILED_MESSAGE,
};
use crate::shared::frame::Frame;
use crate::video::domain::camera::{Camera, CameraOpener};
use crate::video::domain::frame_source::{FrameSource, Mode};
use crate::video::infrastructure::image_file_reader::read_image;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub camera_index: u32,
    pub confidence: f32,
    pub tick_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            camera_index: DEFAULT_CAMERA_INDEX,
            confidence: DEFAULT_CONFIDENCE,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

/// Live/static state machine driving camera → detect → annotate → display.
///
/// Owns the only camera handle. The handle is acquired on every entry into
/// live mode and released on every exit, and on [`FaceSession::close`] or
/// drop. Ticking is paused for the whole file-selection flow so a tick can
/// never observe a half-finished mode switch.
pub struct FaceSession<S: DisplaySurface> {
    highlighter: HighlightFacesUseCase,
    opener: Box<dyn CameraOpener>,
    surface: S,
    source: FrameSource,
    camera_index: u32,
    tick_interval: Duration,
    ticking: bool,
    closed: bool,
}

impl<S: DisplaySurface> FaceSession<S> {
    /// Starts in live mode with the camera open and ticking enabled.
    pub fn new(
        highlighter: HighlightFacesUseCase,
        opener: Box<dyn CameraOpener>,
        surface: S,
        config: &SessionConfig,
    ) -> Self {
        let mut session = Self {
            highlighter,
            opener,
            surface,
            source: FrameSource::Live { camera: None },
            camera_index: config.camera_index,
            tick_interval: config.tick_interval,
            ticking: false,
            closed: false,
        };
        session.enter_live();
        session
    }

    pub fn mode(&self) -> Mode {
        self.source.mode()
    }

    /// Whether periodic ticks should currently be delivered.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn has_camera(&self) -> bool {
        self.source.has_camera()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// One timer tick. Returns `true` if a new frame was rendered.
    ///
    /// Outside live mode, while paused, or when the camera read fails,
    /// this does nothing and the last frame stays on screen.
    pub fn tick(&mut self) -> bool {
        if !self.ticking || self.mode() != Mode::Live {
            return false;
        }
        match self.source.next_frame() {
            Some(frame) => {
                self.present(&frame);
                true
            }
            None => false,
        }
    }

    /// Pauses ticking. Must be called before the file dialog is shown.
    pub fn begin_image_selection(&mut self) {
        if self.closed {
            return;
        }
        self.ticking = false;
        log::debug!("Ticking paused for image selection");
    }

    /// Completes the file-selection flow started by
    /// [`begin_image_selection`](Self::begin_image_selection).
    ///
    /// A chosen file switches to static mode (camera released first) and
    /// displays it once. Cancelling resumes live mode, reopening the camera
    /// if we were static.
    pub fn finish_image_selection(&mut self, path: Option<&Path>) {
        if self.closed {
            return;
        }
        match path {
            Some(path) => self.enter_static(path),
            None if self.mode() == Mode::Static => self.enter_live(),
            None => {
                self.ticking = true;
                log::debug!("Image selection cancelled, ticking resumed");
            }
        }
    }

    /// Releases the camera and stops ticking. Safe to call more than once.
    pub fn close(&mut self) {
        self.ticking = false;
        self.source.release_camera();
        if !self.closed {
            log::info!("Session closed");
        }
        self.closed = true;
    }

    fn enter_live(&mut self) {
        self.source.release_camera();
        let camera = self.acquire_camera();
        self.source = FrameSource::Live { camera };
        self.ticking = true;
        log::info!("Live mode");
    }

    fn enter_static(&mut self, path: &Path) {
        self.ticking = false;
        self.source.release_camera();
        self.source = FrameSource::Static { image: None };
        log::info!("Static mode: {}", path.display());

        match read_image(path) {
            Ok(frame) => {
                self.source = FrameSource::Static { image: Some(frame) };
                if let Some(frame) = self.source.next_frame() {
                    self.present(&frame);
                }
            }
            Err(e) => {
                log::warn!("{e}");
                self.surface.show_message(LOAD_FAILED_MESSAGE);
            }
        }
    }

    fn acquire_camera(&mut self) -> Option<Box<dyn Camera>> {
        match self.opener.open(self.camera_index) {
            Ok(camera) => Some(camera),
            Err(e) => {
                log::warn!("{e}");
                self.surface.show_message(CAMERA_UNAVAILABLE_MESSAGE);
                None
            }
        }
    }

    fn present(&mut self, frame: &Frame) {
        match self.highlighter.execute(frame) {
            Ok((annotated, faces)) => {
                log::trace!("Rendering frame with {} face(s)", faces.len());
                self.surface.render(&annotated);
            }
            Err(e) => {
                log::warn!("Detection failed, showing raw frame: {e}");
                self.surface.render(frame);
            }
        }
    }
}

impl<S: DisplaySurface> Drop for FaceSession<S> {
    fn drop(&mut self) {
        self.close();
    }
}
