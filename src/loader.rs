use log::warn;
use std::fs::File;
use std::path::Path;

use crate::error::ConvertError;
use crate::types::{ExportTask, Keypoint, ResultValue, Track};

/// How to pick tasks out of the export. The two invocation conventions are
/// mutually exclusive: either one task by id (frame count read from its
/// metadata) or every task with an explicitly supplied frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Id(i64),
    FramesCount(usize),
}

/// Tracks and declared frame count for one annotated item.
#[derive(Debug, Clone)]
pub struct LoadedAnnotation {
    pub task_id: i64,
    pub tracks: Vec<Track>,
    pub frames_count: usize,
}

/// Parse a Label Studio export and resolve the selected tasks into tracks
/// with label indices and 0-based keypoints.
pub fn load_annotations(
    export_path: &Path,
    label_names: &[String],
    selector: Selector,
) -> Result<Vec<LoadedAnnotation>, ConvertError> {
    let file = File::open(export_path)?;
    let tasks: Vec<ExportTask> = serde_json::from_reader(file)?;

    match selector {
        Selector::Id(id) => {
            let task = tasks
                .iter()
                .find(|task| task.id == id)
                .ok_or(ConvertError::ItemNotFound { id })?;
            Ok(vec![load_task(task, label_names, None)?])
        }
        Selector::FramesCount(frames_count) => tasks
            .iter()
            .map(|task| load_task(task, label_names, Some(frames_count)))
            .collect(),
    }
}

fn load_task(
    task: &ExportTask,
    label_names: &[String],
    frames_count_override: Option<usize>,
) -> Result<LoadedAnnotation, ConvertError> {
    let results: Vec<&ResultValue> = task
        .annotations
        .iter()
        .flat_map(|annotation| annotation.result.iter())
        .map(|result| &result.value)
        .collect();

    // Every box repeats the whole video's frame count; the first one is
    // authoritative.
    let declared = results.first().map(|value| value.frames_count);
    for value in &results {
        if declared.is_some_and(|count| count != value.frames_count) {
            warn!(
                "task {}: boxes disagree on framesCount ({} vs {}), keeping the first",
                task.id,
                declared.unwrap_or_default(),
                value.frames_count
            );
        }
    }
    let frames_count = frames_count_override.or(declared).unwrap_or(0);

    let mut tracks = Vec::with_capacity(results.len());
    for (track_index, value) in results.iter().enumerate() {
        tracks.push(load_track(track_index, value, label_names)?);
    }

    Ok(LoadedAnnotation {
        task_id: task.id,
        tracks,
        frames_count,
    })
}

fn load_track(
    track_index: usize,
    value: &ResultValue,
    label_names: &[String],
) -> Result<Track, ConvertError> {
    let label_indices = value
        .labels
        .iter()
        .map(|label| {
            label_names
                .iter()
                .position(|name| name == label)
                .ok_or_else(|| ConvertError::UnknownLabel {
                    label: label.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if value.sequence.is_empty() {
        return Err(ConvertError::EmptyTrack { track: track_index });
    }

    // The export's frame numbers are 1-based; this is the only place the
    // offset is applied. Everything downstream is 0-based.
    let mut keypoints = Vec::with_capacity(value.sequence.len());
    let mut previous_frame: Option<usize> = None;
    for raw in &value.sequence {
        let frame = raw.frame.checked_sub(1).ok_or(
            ConvertError::NonMonotonicSequence {
                track: track_index,
                frame: raw.frame,
            },
        )?;
        if previous_frame.is_some_and(|prev| frame <= prev) {
            return Err(ConvertError::NonMonotonicSequence {
                track: track_index,
                frame: raw.frame,
            });
        }
        previous_frame = Some(frame);
        keypoints.push(Keypoint {
            frame,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
        });
    }

    Ok(Track {
        label_indices,
        keypoints,
    })
}
