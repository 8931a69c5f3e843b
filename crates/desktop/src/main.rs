mod app;
mod display;
mod settings;

use std::process;
use std::sync::Mutex;

use face_recognition_core::detection::domain::face_detector::FaceDetector;
use face_recognition_core::detection::infrastructure::onnx_ssd_detector::OnnxSsdDetector;
use face_recognition_core::shared::constants::FACE_MODEL_NAME;
use face_recognition_core::shared::model_resolver;

use app::App;
use settings::Settings;

const WINDOW_TITLE: &str = "Face Recognition";

fn main() -> iced::Result {
    env_logger::init();

    let settings = Settings::load();
    // Without a model there is nothing to show: fail before opening a window.
    let detector = match load_detector(&settings) {
        Ok(detector) => detector,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let detector = Mutex::new(Some(detector));

    iced::application(
        move || {
            let detector = take_detector(&detector).unwrap_or_else(|| {
                log::error!("Face detector already taken; cannot start the window");
                process::exit(1);
            });
            App::new(detector, &settings)
        },
        App::update,
        App::view,
    )
    .title(WINDOW_TITLE)
    .subscription(App::subscription)
    .window(iced::window::Settings {
        size: iced::Size::new(800.0, 600.0),
        exit_on_close_request: false,
        ..Default::default()
    })
    .run()
}

fn load_detector(settings: &Settings) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let model_path = model_resolver::resolve(FACE_MODEL_NAME, settings.model_path.as_deref())?;
    Ok(Box::new(OnnxSsdDetector::new(&model_path)?))
}

/// Hands the detector to the first boot only.
fn take_detector(
    slot: &Mutex<Option<Box<dyn FaceDetector>>>,
) -> Option<Box<dyn FaceDetector>> {
    slot.lock().ok().and_then(|mut slot| slot.take())
}
