use crate::shared::face_box::FaceBox;

/// Values per detection row: `[image_id, class_id, confidence, x1, y1, x2, y2]`.
pub const SSD_ROW_LEN: usize = 7;

const CONFIDENCE_COL: usize = 2;

/// Reads face boxes out of a flattened SSD `DetectionOutput` tensor.
///
/// Rows below `confidence` are dropped; surviving rows keep their order.
/// Trailing values that do not fill a row are ignored.
pub fn parse_detections(data: &[f32], confidence: f32, width: u32, height: u32) -> Vec<FaceBox> {
    data.chunks_exact(SSD_ROW_LEN)
        .filter(|row| row[CONFIDENCE_COL] >= confidence)
        .filter_map(|row| {
            FaceBox::from_normalized(
                [row[3], row[4], row[5], row[6]],
                row[CONFIDENCE_COL],
                width,
                height,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(conf: f32, coords: [f32; 4]) -> Vec<f32> {
        vec![0.0, 1.0, conf, coords[0], coords[1], coords[2], coords[3]]
    }

    fn tensor(rows: &[(f32, [f32; 4])]) -> Vec<f32> {
        rows.iter().flat_map(|&(c, b)| row(c, b)).collect()
    }

    fn sample() -> Vec<f32> {
        tensor(&[
            (0.98, [0.1, 0.1, 0.3, 0.4]),
            (0.05, [0.0, 0.0, 0.1, 0.1]),
            (0.61, [0.5, 0.5, 0.7, 0.9]),
            (0.6, [0.2, 0.6, 0.4, 0.8]),
            (0.45, [0.6, 0.1, 0.8, 0.3]),
        ])
    }

    #[test]
    fn test_keeps_rows_at_or_above_threshold() {
        let faces = parse_detections(&sample(), 0.6, 100, 100);
        let confs: Vec<f32> = faces.iter().map(|f| f.confidence).collect();
        assert_eq!(confs, vec![0.98, 0.61, 0.6]);
    }

    #[test]
    fn test_denormalizes_against_frame_size() {
        let faces = parse_detections(&tensor(&[(0.9, [0.25, 0.5, 0.75, 1.0])]), 0.5, 640, 480);
        assert_eq!(faces.len(), 1);
        let f = faces[0];
        assert_eq!((f.left, f.top, f.right, f.bottom), (160, 240, 480, 479));
    }

    #[test]
    fn test_empty_tensor_yields_no_faces() {
        assert!(parse_detections(&[], 0.6, 100, 100).is_empty());
    }

    #[test]
    fn test_partial_trailing_row_is_ignored() {
        let mut data = tensor(&[(0.9, [0.1, 0.1, 0.5, 0.5])]);
        data.extend_from_slice(&[0.0, 1.0, 0.99]);
        assert_eq!(parse_detections(&data, 0.5, 100, 100).len(), 1);
    }

    #[test]
    fn test_off_image_rows_are_dropped() {
        let data = tensor(&[(0.9, [1.2, 1.2, 1.5, 1.5])]);
        assert!(parse_detections(&data, 0.5, 100, 100).is_empty());
    }

    #[rstest]
    #[case(0.0, 0.5)]
    #[case(0.3, 0.6)]
    #[case(0.6, 0.61)]
    #[case(0.5, 0.99)]
    #[case(0.61, 1.0)]
    fn test_higher_threshold_yields_subset(#[case] low: f32, #[case] high: f32) {
        let data = sample();
        let loose = parse_detections(&data, low, 320, 240);
        let strict = parse_detections(&data, high, 320, 240);
        assert!(strict.len() <= loose.len());
        for face in &strict {
            assert!(loose.contains(face), "{face:?} missing at threshold {low}");
        }
    }
}
