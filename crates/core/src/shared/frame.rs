/// A single camera or image frame: contiguous RGB bytes in row-major order.
///
/// RGB is the order detection and annotation work in. The display side
/// wants RGBA; [`Frame::to_rgba`] is the only place the two meet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

pub const RGB_CHANNELS: usize = 3;

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * RGB_CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Solid-color frame, mostly useful for tests and placeholders.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * RGB_CHANNELS)
            .collect();
        Self::new(data, width, height)
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height)
    }

    pub fn into_rgb_image(self) -> image::RgbImage {
        let (width, height) = (self.width, self.height);
        // Length is checked at construction, so this cannot fail.
        image::RgbImage::from_raw(width, height, self.data)
            .unwrap_or_else(|| image::RgbImage::new(width, height))
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * RGB_CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Packs the frame as RGBA with an opaque alpha channel.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / RGB_CHANNELS * 4);
        for px in self.data.chunks_exact(RGB_CHANNELS) {
            out.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        out
    }
}
