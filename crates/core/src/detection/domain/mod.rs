pub mod face_detector;
pub mod ssd_output;
