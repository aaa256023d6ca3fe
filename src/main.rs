use anyhow::Context;
use clap::Parser;
use gallery_squeeze::cli::Args;
use gallery_squeeze::{batch_compress_images, logger};
use std::process::ExitCode;

const EXIT_FILES_FAILED: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FILES_FAILED),
        Err(e) => {
            gallery_squeeze::error!("{:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Returns `Ok(false)` when at least one file failed and failures are not allowed.
fn run(args: &Args) -> anyhow::Result<bool> {
    let config = args.to_batch_config().context("Invalid options")?;

    let report = batch_compress_images(&config).with_context(|| {
        format!(
            "Failed to compress images in {}",
            config.directory.display()
        )
    })?;
    report.print_summary();

    Ok(args.allow_failures || !report.has_failures())
}
