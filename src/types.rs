use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

// One task in a Label Studio export: an annotated item (video) with an id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportTask {
    pub id: i64,
    pub annotations: Vec<TaskAnnotation>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TaskAnnotation {
    pub result: Vec<AnnotationResult>,
}

// One tracked box in a task's annotation result list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnnotationResult {
    pub value: ResultValue,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResultValue {
    /// Total frame count of the whole video; every box repeats it.
    pub frames_count: usize,
    pub labels: Vec<String>,
    pub sequence: Vec<RawKeypoint>,
}

/// A keyframe as it appears in the export: `frame` is 1-based, coordinates are
/// corner-anchored percentages (0-100).
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct RawKeypoint {
    pub frame: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A keyframe after ingestion: 0-based frame, same percentage geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub frame: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One tracked object's keyframe sequence, with its labels resolved to
/// indices into the name list. Keypoints are strictly increasing by frame.
#[derive(Debug, Clone)]
pub struct Track {
    pub label_indices: Vec<usize>,
    pub keypoints: Vec<Keypoint>,
}

/// One object instance at one frame, in normalized YOLO center format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub label_index: usize,
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-frame detection lists for one annotated item, keyed by 0-based frame
/// index. Length is fixed at construction to the declared frame count.
#[derive(Debug, Clone)]
pub struct FrameLabels {
    frames: Vec<Vec<Detection>>,
}

impl FrameLabels {
    pub fn new(frames_count: usize) -> Self {
        Self {
            frames: vec![Vec::new(); frames_count],
        }
    }

    pub fn frames_count(&self) -> usize {
        self.frames.len()
    }

    /// Append a detection to the given frame's list, preserving insertion
    /// order. Frames beyond the declared count are rejected.
    pub fn push(&mut self, frame: usize, detection: Detection) -> Result<(), ConvertError> {
        let frames_count = self.frames.len();
        self.frames
            .get_mut(frame)
            .ok_or(ConvertError::FrameOutOfRange {
                frame,
                frames_count,
            })?
            .push(detection);
        Ok(())
    }

    pub fn get(&self, frame: usize) -> Option<&[Detection]> {
        self.frames.get(frame).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Detection])> {
        self.frames
            .iter()
            .enumerate()
            .map(|(frame, detections)| (frame, detections.as_slice()))
    }
}
