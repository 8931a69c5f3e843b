use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::camera::CaptureError;

/// Decodes an image file into an RGB frame using the `image` crate.
///
/// The format is sniffed from the content, so a mislabelled extension
/// still decodes; unsupported or corrupt data is a [`CaptureError::Decode`].
pub fn read_image(path: &Path) -> Result<Frame, CaptureError> {
    let decode_err = |source: image::ImageError| CaptureError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let img = image::ImageReader::open(path)
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;
    Ok(Frame::from_rgb_image(img.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_reads_dimensions_and_rgb_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", 100, 80);
        let frame = read_image(&path).unwrap();
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
        assert_eq!(frame.pixel(0, 0), [50, 100, 200]);
    }

    #[test]
    fn test_reads_bmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.bmp", 12, 9);
        assert_eq!(read_image(&path).unwrap().width(), 12);
    }

    #[test]
    fn test_nonexistent_path_is_decode_error() {
        let err = read_image(Path::new("/nonexistent/test.png")).unwrap_err();
        assert!(matches!(err, CaptureError::Decode { .. }));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"\xFF\xD8\xFF\xE0 not really a jpeg").unwrap();
        let err = read_image(&path).unwrap_err();
        assert!(err.to_string().contains("broken.jpg"));
    }
}
