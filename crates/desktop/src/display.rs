use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length};

use face_recognition_core::pipeline::display_surface::DisplaySurface;
use face_recognition_core::shared::frame::Frame;

use crate::app::Message;

#[derive(Debug, Clone, Default)]
enum ViewContent {
    #[default]
    Empty,
    Image(image::Handle),
    Message(String),
}

/// The window's image area: holds whatever the session last displayed.
///
/// Scaling happens at draw time, so the picture follows window resizes and
/// frames of any size.
#[derive(Debug, Default)]
pub struct ImageView {
    content: ViewContent,
}

impl ImageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let inner: Element<'_, Message> = match &self.content {
            ViewContent::Empty => text("").into(),
            ViewContent::Image(handle) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .filter_method(image::FilterMethod::Linear)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            ViewContent::Message(message) => text(message.as_str()).size(18).into(),
        };
        container(inner)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    #[cfg(test)]
    fn message(&self) -> Option<&str> {
        match &self.content {
            ViewContent::Message(m) => Some(m),
            _ => None,
        }
    }
}

impl DisplaySurface for ImageView {
    fn render(&mut self, frame: &Frame) {
        self.content = ViewContent::Image(image::Handle::from_rgba(
            frame.width(),
            frame.height(),
            frame.to_rgba(),
        ));
    }

    fn show_message(&mut self, message: &str) {
        self.content = ViewContent::Message(message.to_string());
    }
}
