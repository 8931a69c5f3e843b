pub mod camera;
pub mod frame_source;
pub mod image_writer;
