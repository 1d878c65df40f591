use indicatif::ProgressBar;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::FrameLabels;
use crate::utils::pad_frame_index;

/// Write one `frame_<n>.txt` per frame index, zero-padded to the width of the
/// total frame count. Frames without detections produce an empty file. Each
/// line is `<label_index> <cx> <cy> <w> <h>` in insertion order.
pub fn write_labels(
    labels: &FrameLabels,
    output_dir: &Path,
    pb: Option<&ProgressBar>,
) -> std::io::Result<usize> {
    let frames_count = labels.frames_count();
    for (frame, detections) in labels.iter() {
        let file_name = format!("frame_{}.txt", pad_frame_index(frame, frames_count));
        let mut writer = BufWriter::new(File::create(output_dir.join(file_name))?);
        for detection in detections {
            writeln!(
                writer,
                "{} {:.6} {:.6} {:.6} {:.6}",
                detection.label_index,
                detection.cx,
                detection.cy,
                detection.width,
                detection.height
            )?;
        }
        writer.flush()?;
        if let Some(pb) = pb {
            pb.inc(1);
        }
    }
    Ok(frames_count)
}
