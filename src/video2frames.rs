use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use labelstudio2yolo::frames::{write_frame_image, ImageSequenceSource};
use labelstudio2yolo::utils::{create_output_directory, create_progress_bar};
use labelstudio2yolo::{sample_frames, FrameSource, SampleArgs};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = SampleArgs::parse();

    let input = PathBuf::from(&args.input);
    if !input.exists() {
        error!("The specified input directory does not exist: {}", args.input);
        return ExitCode::FAILURE;
    }
    let output = PathBuf::from(&args.output);

    if let Err(e) = run(&input, &output, args.source_rate, args.frame_rate) {
        error!("Resampling failed: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(
    input: &PathBuf,
    output: &PathBuf,
    source_rate: f64,
    target_rate: f64,
) -> std::io::Result<()> {
    let mut source = ImageSequenceSource::open(input, source_rate)?;
    let expected =
        (source.frame_count() as f64 / source.frame_rate() * target_rate).round() as usize;
    info!("Original frames: {}", source.frame_count());
    info!("Target frames: {}", expected);

    create_output_directory(output)?;
    let pb = create_progress_bar(expected as u64, "Frames");

    let report = sample_frames(&mut source, target_rate, |index, image| {
        write_frame_image(image, output, index, expected)?;
        pb.inc(1);
        Ok(())
    })?;
    pb.finish_with_message("Resampling complete");

    info!(
        "Done. Wrote {} frames to {}. Last frame was {}.",
        report.emitted,
        output.display(),
        report.last_index
    );
    Ok(())
}
