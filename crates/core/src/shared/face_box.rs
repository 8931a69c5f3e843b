use serde::Serialize;

/// A detected face in source-image pixel coordinates.
///
/// `right` and `bottom` are inclusive pixel positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FaceBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub confidence: f32,
}

impl FaceBox {
    /// Denormalizes fractional coordinates against a `width` × `height` image.
    ///
    /// Coordinates are truncated, put in left/right and top/bottom order, then
    /// clamped to the image. Zero-width or zero-height boxes are kept and draw
    /// as lines. Returns `None` only when the box lies entirely off-image.
    pub fn from_normalized(
        coords: [f32; 4],
        confidence: f32,
        width: u32,
        height: u32,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let max_x = width as i32 - 1;
        let max_y = height as i32 - 1;
        let scale = |v: f32, dim: u32| (v as f64 * dim as f64) as i32;

        let (x1, x2) = ordered(scale(coords[0], width), scale(coords[2], width));
        let (y1, y2) = ordered(scale(coords[1], height), scale(coords[3], height));

        if x2 < 0 || y2 < 0 || x1 > max_x || y1 > max_y {
            return None;
        }

        Some(Self {
            left: x1.clamp(0, max_x),
            top: y1.clamp(0, max_y),
            right: x2.clamp(0, max_x),
            bottom: y2.clamp(0, max_y),
            confidence,
        })
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Confidence as a percentage with one decimal, e.g. `"97.3%"`.
    pub fn label(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    (a.min(b), a.max(b))
}
