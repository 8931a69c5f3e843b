use crate::shared::frame::Frame;

/// Sink for finished frames. Implementations own scaling and painting.
pub trait DisplaySurface {
    /// Shows `frame`, replacing whatever was displayed.
    fn render(&mut self, frame: &Frame);

    /// Shows a text placeholder instead of an image.
    fn show_message(&mut self, message: &str);
}
