use clap::Parser;
use std::str::FromStr;

/// Command-line arguments for converting a Label Studio video annotation
/// export to per-frame YOLO label files.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct ConvertArgs {
    /// Path of the JSON file containing the Label Studio export
    #[arg(short = 'i', long = "input")]
    pub input: String,

    /// Path of the file containing newline-separated (case sensitive) label names
    #[arg(short = 'n', long = "names")]
    pub names: String,

    /// Path of the output directory for the per-frame .txt label files
    #[arg(short = 'o', long = "output")]
    pub output: String,

    /// Id of the task to convert; its framesCount metadata is used
    #[arg(long = "id", conflicts_with = "frames_count")]
    pub id: Option<i64>,

    /// Convert every task in the export with this explicit frame count
    #[arg(long = "frames-count", conflicts_with = "id")]
    pub frames_count: Option<usize>,
}

/// Command-line arguments for resampling a decoded frame sequence to a target
/// frame rate.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct SampleArgs {
    /// Directory of pre-decoded frame images (jpg/png), in name order
    #[arg(short = 'i', long = "input")]
    pub input: String,

    /// Path of the output directory for the resampled .jpg frames
    #[arg(short = 'o', long = "output")]
    pub output: String,

    /// Native frame rate of the input sequence
    #[arg(long = "source-rate", value_parser = validate_rate)]
    pub source_rate: f64,

    /// Target frame rate
    #[arg(long = "frame-rate", short = 'r', default_value_t = 25.0, value_parser = validate_rate)]
    pub frame_rate: f64,
}

// Validate that a frame rate is a positive finite number
fn validate_rate(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if val.is_finite() && val > 0.0 => Ok(val),
        _ => Err("RATE must be a positive number".to_string()),
    }
}
