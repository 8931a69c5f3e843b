pub mod annotate_image_use_case;
pub mod display_surface;
pub mod face_session;
pub mod highlight_faces_use_case;
