use std::sync::OnceLock;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::Rgb;
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

pub const BOX_COLOR: Rgb<u8> = Rgb([11, 255, 0]);

/// Label size in OpenCV font-scale units.
pub const LABEL_SCALE: f32 = 0.6;

/// Font pixel height at scale 1.0; digits come out about 21 px tall.
const FONT_PX_PER_SCALE: f32 = 33.0;

/// Gap between the label baseline and the top edge of its box.
pub const LABEL_OFFSET: i32 = 10;

/// One pixel of stroke per this many rows of image height.
const ROWS_PER_STROKE_PIXEL: u32 = 150;

static LABEL_FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

fn label_font() -> Option<&'static FontRef<'static>> {
    static FONT: OnceLock<Option<FontRef<'static>>> = OnceLock::new();
    FONT.get_or_init(|| match FontRef::try_from_slice(LABEL_FONT_BYTES) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("Label font unusable, drawing boxes without labels: {e}");
            None
        }
    })
    .as_ref()
}

/// Stroke width for a frame of the given height, at least one pixel.
///
/// `height / 150` rounded half to even.
pub fn line_thickness(frame_height: u32) -> i32 {
    let whole = frame_height / ROWS_PER_STROKE_PIXEL;
    let rest = frame_height % ROWS_PER_STROKE_PIXEL;
    let rounded = if rest * 2 > ROWS_PER_STROKE_PIXEL
        || (rest * 2 == ROWS_PER_STROKE_PIXEL && whole % 2 == 1)
    {
        whole + 1
    } else {
        whole
    };
    (rounded as i32).max(1)
}

/// Draws each face's box and confidence label onto a copy of `frame`.
///
/// With no faces the copy is untouched.
pub fn annotate(frame: &Frame, faces: &[FaceBox]) -> Frame {
    if faces.is_empty() {
        return frame.clone();
    }

    let thickness = line_thickness(frame.height());
    let mut img = frame.clone().into_rgb_image();
    let font = label_font();
    let scale = PxScale::from(LABEL_SCALE * FONT_PX_PER_SCALE);

    for face in faces {
        for inset in 0..thickness {
            let w = face.width() + 1 - 2 * inset;
            let h = face.height() + 1 - 2 * inset;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = Rect::at(face.left + inset, face.top + inset).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(&mut img, rect, BOX_COLOR);
        }
        if let Some(font) = font {
            // draw_text_mut takes the top of the line box, not the baseline
            let ascent = font.as_scaled(scale).ascent().round() as i32;
            let baseline = face.top - LABEL_OFFSET;
            draw_text_mut(
                &mut img,
                BOX_COLOR,
                face.left,
                baseline - ascent,
                scale,
                font,
                &face.label(),
            );
        }
    }

    Frame::from_rgb_image(img)
}
