use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a newline-separated label name file; list position = label index.
/// Trailing blank lines are ignored so a final newline does not produce a
/// phantom empty label.
pub fn read_label_names(path: &Path) -> std::io::Result<Vec<String>> {
    let reader = BufReader::new(fs::File::open(path)?);
    let mut names: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    while names.last().is_some_and(|name| name.trim().is_empty()) {
        names.pop();
    }
    Ok(names)
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Create the output directory if it is absent. Existing content is left in
/// place so reruns stay idempotent.
pub fn create_output_directory(path: &Path) -> std::io::Result<std::path::PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        log::info!("Directory did not exist. Created {}", path.display());
    }
    Ok(path.to_path_buf())
}

/// Zero-pad `index` to the decimal width of `total`, matching the frame
/// artifact naming scheme.
pub fn pad_frame_index(index: usize, total: usize) -> String {
    let width = total.max(1).to_string().len();
    format!("{:0width$}", index, width = width)
}
