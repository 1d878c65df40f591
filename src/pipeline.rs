use log::info;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::interpolate::interpolate_tracks;
use crate::loader::{load_annotations, LoadedAnnotation, Selector};
use crate::types::FrameLabels;
use crate::utils::{create_output_directory, create_progress_bar, read_label_names};
use crate::writer::write_labels;

/// Everything one conversion run needs. Paths and the selector come from the
/// command surface; nothing in here reads process arguments.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub names: PathBuf,
    pub output_dir: PathBuf,
    pub selector: Selector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSummary {
    pub tasks: usize,
    pub tracks: usize,
    pub frames_written: usize,
}

/// Run the full conversion: load, interpolate every track sequentially, write
/// per-frame label files. With an id selector output goes directly into the
/// output directory; in the id-less mode each task gets a `task_<id>`
/// subdirectory.
pub fn run_conversion(config: &ConvertConfig) -> Result<ConversionSummary, ConvertError> {
    let label_names = read_label_names(&config.names)?;
    info!("Label names: {:?}", label_names);

    let annotations = load_annotations(&config.input, &label_names, config.selector)?;
    info!("Loaded {} task(s) from the export", annotations.len());

    let single_task = matches!(config.selector, Selector::Id(_));
    let mut summary = ConversionSummary::default();

    for annotation in &annotations {
        let task_dir = if single_task {
            config.output_dir.clone()
        } else {
            config.output_dir.join(format!("task_{}", annotation.task_id))
        };
        let frames_written = convert_annotation(annotation, &task_dir)?;
        summary.tasks += 1;
        summary.tracks += annotation.tracks.len();
        summary.frames_written += frames_written;
    }

    info!(
        "Done. Wrote labels for {} frames across {} task(s).",
        summary.frames_written, summary.tasks
    );
    Ok(summary)
}

fn convert_annotation(
    annotation: &LoadedAnnotation,
    output_dir: &Path,
) -> Result<usize, ConvertError> {
    let mut labels = FrameLabels::new(annotation.frames_count);
    interpolate_tracks(&annotation.tracks, &mut labels)?;

    create_output_directory(output_dir)?;
    let pb = create_progress_bar(labels.frames_count() as u64, "Labels");
    let frames_written = write_labels(&labels, output_dir, Some(&pb))?;
    pb.finish_with_message("Label writing complete");
    Ok(frames_written)
}
