use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use labelstudio2yolo::{run_conversion, ConvertArgs, ConvertConfig, Selector};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = ConvertArgs::parse();

    let input = PathBuf::from(&args.input);
    if !input.exists() {
        error!("The specified input file does not exist: {}", args.input);
        return ExitCode::FAILURE;
    }

    let selector = match (args.id, args.frames_count) {
        (Some(id), None) => Selector::Id(id),
        (None, Some(frames_count)) => Selector::FramesCount(frames_count),
        _ => {
            error!("Specify exactly one of --id or --frames-count");
            return ExitCode::FAILURE;
        }
    };

    let config = ConvertConfig {
        input,
        names: PathBuf::from(&args.names),
        output_dir: PathBuf::from(&args.output),
        selector,
    };

    info!("Starting the conversion process...");
    match run_conversion(&config) {
        Ok(summary) => {
            info!(
                "Converted {} track(s) into {} label file(s).",
                summary.tracks, summary.frames_written
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
