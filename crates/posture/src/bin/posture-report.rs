use {
    anyhow::{Context, Result, bail},
    base::*,
    image::{RgbImage, encode_jpeg},
    posture::*,
    std::path::PathBuf,
};

// directory for date-named log files; stdout logging when unset
const LOG_DIR_ENV: &str = "POSTURE_LOG_DIR";

const JPEG_QUALITY: u8 = 90;

/// Hands out landmarks that were estimated elsewhere and stored as JSON.
struct StoredPose(Option<PoseLandmarks>);

impl PoseEstimator for StoredPose {
    fn estimate(&mut self, _image: &RgbImage) -> Result<Option<PoseLandmarks>, PostureError> {
        Ok(self.0.take())
    }
}

fn usage() -> ! {
    eprintln!("usage: posture-report <pose.json> [image] [annotated.jpg]");
    std::process::exit(2);
}

fn main() -> Result<()> {
    match std::env::var(LOG_DIR_ENV) {
        Ok(dir) => init_file_logger(dir).context("cannot open log directory")?,
        Err(_) => init_stdout_logger(),
    }

    let mut args = std::env::args().skip(1);
    let Some(pose_path) = args.next().map(PathBuf::from) else {
        usage();
    };
    let image_path = args.next().map(PathBuf::from);
    let output_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("annotated.jpg"));

    let json = std::fs::read_to_string(&pose_path).with_context(|| format!("cannot read {}", pose_path.display()))?;
    let pose: PoseLandmarks = serde_json::from_str(&json).with_context(|| format!("invalid pose in {}", pose_path.display()))?;
    if pose.is_empty() {
        bail!("{}: {}", pose_path.display(), PostureError::NoPersonDetected);
    }

    let assessment = match image_path {
        Some(image_path) => {
            let bytes = std::fs::read(&image_path).with_context(|| format!("cannot read {}", image_path.display()))?;
            let mut estimator = StoredPose(Some(pose));
            let analysis = analyze_image(&bytes, &mut estimator, &OverlayRenderer::default())?;
            std::fs::write(&output_path, encode_jpeg(&analysis.annotated, JPEG_QUALITY)?)
                .with_context(|| format!("cannot write {}", output_path.display()))?;
            log::info!("annotated image written to {}", output_path.display());
            analysis.assessment
        }
        None => assess_pose(&pose),
    };

    log::info!(
        "{}: {}",
        pose_path.display(),
        if assessment.is_good_posture { "good posture" } else { "bad posture" }
    );
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
