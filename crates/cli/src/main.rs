use std::path::PathBuf;
use std::process;

use clap::Parser;

use face_recognition_core::detection::infrastructure::onnx_ssd_detector::OnnxSsdDetector;
use face_recognition_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use face_recognition_core::pipeline::highlight_faces_use_case::HighlightFacesUseCase;
use face_recognition_core::shared::constants::{DEFAULT_CONFIDENCE, FACE_MODEL_NAME};
use face_recognition_core::shared::face_box::FaceBox;
use face_recognition_core::shared::model_resolver;
use face_recognition_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Detect faces in an image and draw boxes with confidence labels.
#[derive(Parser)]
#[command(name = "face-detect")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Where to write the annotated image (format follows the extension).
    output: Option<PathBuf>,

    /// Minimum detection confidence (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE, value_parser = parse_confidence)]
    confidence: f32,

    /// Path to the ONNX face model. Searched for in the usual places if omitted.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Print detections as a JSON array instead of one line per face.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let model_path = model_resolver::resolve(FACE_MODEL_NAME, cli.model.as_deref())?;
    let detector = OnnxSsdDetector::new(&model_path)?;

    let mut use_case = AnnotateImageUseCase::new(
        HighlightFacesUseCase::new(Box::new(detector), cli.confidence),
        Box::new(ImageFileWriter::new()),
    );
    let faces = use_case.execute(&cli.input, cli.output.as_deref())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&faces)?);
    } else {
        print_faces(&faces);
    }
    if let Some(output) = &cli.output {
        log::info!("Annotated image written to {}", output.display());
    }
    Ok(())
}

fn print_faces(faces: &[FaceBox]) {
    if faces.is_empty() {
        println!("No faces found");
        return;
    }
    for face in faces {
        println!(
            "{:>6}  left={} top={} right={} bottom={}",
            face.label(),
            face.left,
            face.top,
            face.right,
            face.bottom
        );
    }
}

fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("confidence must be between 0 and 1, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confidence_accepts_unit_range() {
        assert_eq!(parse_confidence("0"), Ok(0.0));
        assert_eq!(parse_confidence("0.6"), Ok(0.6));
        assert_eq!(parse_confidence("1"), Ok(1.0));
    }

    #[test]
    fn test_parse_confidence_rejects_out_of_range() {
        assert!(parse_confidence("1.5").is_err());
        assert!(parse_confidence("-0.1").is_err());
        assert!(parse_confidence("high").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["face-detect", "in.jpg"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.jpg"));
        assert!(cli.output.is_none());
        assert_eq!(cli.confidence, DEFAULT_CONFIDENCE);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "face-detect",
            "in.jpg",
            "out.png",
            "--confidence",
            "0.8",
            "--model",
            "m.onnx",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert_eq!(cli.confidence, 0.8);
        assert_eq!(cli.model, Some(PathBuf::from("m.onnx")));
        assert!(cli.json);
    }

    #[test]
    fn test_cli_rejects_bad_confidence() {
        assert!(Cli::try_parse_from(["face-detect", "in.jpg", "--confidence", "2"]).is_err());
    }
}
