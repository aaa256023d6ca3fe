use crate::constants::{PLAN_PREFIX, PROGRESS_BAR_TEMPLATE, START_PREFIX, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{CompressionError, Result};
use crate::processing::{plan_image, process_image_pipeline, CompressionOptions};
use crate::report::{display_name, BatchReport, FileReport, FileStatus};
use crate::utils::{format_dimensions, format_file_size};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub directory: PathBuf,
    pub options: CompressionOptions,
    /// Worker threads; `None` or `Some(1)` processes files one after another.
    pub jobs: Option<usize>,
    pub dry_run: bool,
}

impl BatchConfig {
    pub fn new(directory: impl Into<PathBuf>, options: CompressionOptions) -> Self {
        Self {
            directory: directory.into(),
            options,
            jobs: None,
            dry_run: false,
        }
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn worker_count(&self, total_files: usize) -> Option<usize> {
        self.jobs
            .filter(|&jobs| jobs > 1)
            .map(|jobs| jobs.min(total_files).max(1))
    }
}

/// Compresses every qualifying image in `config.directory`.
///
/// Only problems with the directory itself are returned as errors. A file
/// that fails is logged, recorded in the report and skipped; the remaining
/// files are still processed.
pub fn batch_compress_images(config: &BatchConfig) -> Result<BatchReport> {
    crate::info!(
        "{} Compressing images in {}...",
        START_PREFIX,
        config.directory.display()
    );

    let image_files = collect_image_files(&config.directory)?;
    let total_files = image_files.len();

    if total_files == 0 {
        crate::warn!("No image files found in {}", config.directory.display());
    } else {
        crate::verbose!("Found {} image files to process", total_files);
    }

    let progress = create_progress_bar(total_files as u64);

    let files: Vec<FileReport> = match config.worker_count(total_files) {
        Some(workers) => {
            crate::verbose!("Using {} worker threads", workers);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?;
            pool.install(|| {
                image_files
                    .par_iter()
                    .map(|path| process_entry(path, config, &progress))
                    .collect()
            })
        }
        None => image_files
            .iter()
            .map(|path| process_entry(path, config, &progress))
            .collect(),
    };

    progress.finish_and_clear();
    crate::info!("Compression complete.");

    Ok(BatchReport::new(config.directory.clone(), files))
}

/// Lists the images directly inside `directory`, sorted by file name.
///
/// Subdirectories are not descended into and files whose extension is not
/// one of png, jpg, jpeg or webp are ignored.
pub fn collect_image_files(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(CompressionError::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut image_files = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            image_files.push(path.to_path_buf());
        }
    }

    Ok(image_files)
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn create_progress_bar(total: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template(PROGRESS_BAR_TEMPLATE)
        .map(|style| style.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let progress = ProgressBar::new(total);
    progress.set_style(style);
    progress
}

fn process_entry(path: &Path, config: &BatchConfig, progress: &ProgressBar) -> FileReport {
    progress.set_message(display_name(path));

    let result = if config.dry_run {
        plan_image(path, &config.options)
    } else {
        process_image_pipeline(path, &config.options)
    };

    let report = match result {
        Ok(status) => FileReport::new(path.to_path_buf(), status),
        Err(e) => FileReport::failed(path.to_path_buf(), e),
    };

    progress.suspend(|| log_file_result(&report));
    progress.inc(1);
    report
}

fn log_file_result(report: &FileReport) {
    let name = report.display_name();
    match &report.status {
        FileStatus::Compressed {
            original,
            output,
            bytes_before,
            bytes_after,
            output_path,
        } => {
            crate::success!("Compressed {}", name);
            crate::verbose!(
                "  {} -> {}, {} -> {}",
                format_dimensions(*original),
                format_dimensions(*output),
                format_file_size(*bytes_before),
                format_file_size(*bytes_after)
            );
            if output_path != &report.path {
                crate::verbose!("  written to {}", output_path.display());
            }
        }
        FileStatus::Planned {
            original,
            output,
            output_path,
        } => {
            crate::info!(
                "{} Would compress {} ({} -> {}) into {}",
                PLAN_PREFIX,
                name,
                format_dimensions(*original),
                format_dimensions(*output),
                output_path.display()
            );
        }
        FileStatus::Failed { error } => {
            crate::error!("Error processing {}: {}", name, error);
        }
    }
}
