use glob::glob;
use image::DynamicImage;
use std::io;
use std::path::{Path, PathBuf};

use crate::sampler::{Frame, FrameSource};
use crate::utils::pad_frame_index;

/// Frame source backed by a directory of pre-decoded frame images (the output
/// of an external decoder such as ffmpeg), in lexicographic name order.
/// Timestamps are synthesized from the caller-declared native rate as
/// `index / rate`, matching a constant-frame-rate decode.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    rate: f64,
    cursor: usize,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path, rate: f64) -> io::Result<Self> {
        let mut paths = Vec::new();
        for ext in ["jpg", "jpeg", "png"] {
            let pattern = format!("{}/*.{}", dir.display(), ext);
            let entries = glob(&pattern)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            paths.extend(entries.filter_map(|entry| entry.ok()));
        }
        paths.sort();
        if paths.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no frame images found in {}", dir.display()),
            ));
        }
        Ok(Self {
            paths,
            rate,
            cursor: 0,
        })
    }
}

impl FrameSource for ImageSequenceSource {
    type Image = DynamicImage;

    fn frame_rate(&self) -> f64 {
        self.rate
    }

    fn frame_count(&self) -> usize {
        self.paths.len()
    }

    fn next_frame(&mut self) -> io::Result<Option<Frame<DynamicImage>>> {
        let Some(path) = self.paths.get(self.cursor) else {
            return Ok(None);
        };
        let index = self.cursor;
        self.cursor += 1;
        // Open the file only for the duration of this frame's decode.
        let image = image::open(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(Frame {
            index,
            timestamp: index as f64 / self.rate,
            image,
        }))
    }
}

/// Save an emitted frame as `frame_<n>.jpg`, zero-padded to the width of the
/// expected target count.
pub fn write_frame_image(
    image: &DynamicImage,
    output_dir: &Path,
    index: usize,
    expected_count: usize,
) -> io::Result<()> {
    let file_name = format!("frame_{}.jpg", pad_frame_index(index, expected_count));
    image
        .save(output_dir.join(file_name))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
