use thiserror::Error;

/// Axis of the interpolation drift check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftAxis {
    X,
    Y,
    Width,
    Height,
}

impl std::fmt::Display for DriftAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DriftAxis::X => "x",
            DriftAxis::Y => "y",
            DriftAxis::Width => "width",
            DriftAxis::Height => "height",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("label {label:?} is not present in the label name list")]
    UnknownLabel { label: String },

    #[error("no task with id {id} in the export")]
    ItemNotFound { id: i64 },

    #[error(
        "interpolated {axis} drifted {delta:e} from the keyframe value \
         (track {track}, keypoint pair {pair}); tolerance is 1e-5"
    )]
    GeometryDrift {
        track: usize,
        pair: usize,
        axis: DriftAxis,
        delta: f64,
    },

    #[error("track {track}: keypoint frames must strictly increase, got frame {frame}")]
    NonMonotonicSequence { track: usize, frame: usize },

    #[error("keypoint frame {frame} is outside the declared frame count {frames_count}")]
    FrameOutOfRange { frame: usize, frames_count: usize },

    #[error("track {track} has an empty keypoint sequence")]
    EmptyTrack { track: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse annotation export: {0}")]
    Json(#[from] serde_json::Error),
}
