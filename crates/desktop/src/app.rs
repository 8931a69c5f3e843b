use std::path::PathBuf;

use iced::widget::{button, column, container, text};
use iced::{window, Element, Length, Subscription, Task};

use face_recognition_core::detection::domain::face_detector::FaceDetector;
use face_recognition_core::pipeline::face_session::FaceSession;
use face_recognition_core::pipeline::highlight_faces_use_case::HighlightFacesUseCase;
use face_recognition_core::shared::constants::IMAGE_EXTENSIONS;
use face_recognition_core::video::infrastructure::nokhwa_camera::NokhwaCameraOpener;

use crate::display::ImageView;
use crate::settings::Settings;

const SELECT_IMAGE_LABEL: &str = "Select image";

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    SelectImage,
    ImageSelected(Option<PathBuf>),
    CloseRequested(window::Id),
}

pub struct App {
    session: FaceSession<ImageView>,
    /// A file dialog is open; further clicks are ignored until it returns.
    selecting: bool,
}

impl App {
    pub fn new(detector: Box<dyn FaceDetector>, settings: &Settings) -> (Self, Task<Message>) {
        let config = settings.session_config();
        let session = FaceSession::new(
            HighlightFacesUseCase::new(detector, config.confidence),
            Box::new(NokhwaCameraOpener),
            ImageView::new(),
            &config,
        );
        (
            Self {
                session,
                selecting: false,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.session.tick();
            }
            Message::SelectImage => {
                if self.selecting {
                    return Task::none();
                }
                self.selecting = true;
                // Ticks stop here, before the dialog exists.
                self.session.begin_image_selection();
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select image")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::ImageSelected,
                );
            }
            Message::ImageSelected(path) => {
                self.selecting = false;
                self.session.finish_image_selection(path.as_deref());
            }
            Message::CloseRequested(id) => {
                self.session.close();
                return window::close(id);
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let select = button(text(SELECT_IMAGE_LABEL).size(14))
            .on_press(Message::SelectImage)
            .padding([8, 20]);

        column![
            self.session.surface().view(),
            container(select).center_x(Length::Fill).padding([8, 0]),
        ]
        .height(Length::Fill)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let close = window::close_requests().map(Message::CloseRequested);
        if self.session.is_ticking() {
            Subscription::batch([
                iced::time::every(self.session.tick_interval()).map(|_| Message::Tick),
                close,
            ])
        } else {
            close
        }
    }
}
