//! Label Studio video annotations to YOLO format converter
//!
//! This library expands sparse keyframed bounding-box annotations into dense
//! per-frame YOLO label files, and resamples decoded frame sequences to a
//! fixed target frame rate.

pub mod config;
pub mod error;
pub mod frames;
pub mod interpolate;
pub mod loader;
pub mod pipeline;
pub mod sampler;
pub mod types;
pub mod utils;
pub mod writer;

// Re-export commonly used types and functions
pub use config::{ConvertArgs, SampleArgs};
pub use error::{ConvertError, DriftAxis};
pub use interpolate::{interpolate_track, interpolate_tracks, DRIFT_TOLERANCE};
pub use loader::{load_annotations, LoadedAnnotation, Selector};
pub use pipeline::{run_conversion, ConversionSummary, ConvertConfig};
pub use sampler::{sample_frames, Frame, FrameSource, SampleReport, SyntheticSource};
pub use types::{Detection, FrameLabels, Keypoint, Track};
pub use writer::write_labels;
