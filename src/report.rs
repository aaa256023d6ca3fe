use crate::constants::{RATIO_PREFIX, SUMMARY_PREFIX};
use crate::error::CompressionError;
use crate::utils::{calculate_compression_ratio, format_file_size};
use std::path::{Path, PathBuf};

/// Outcome of a single file in a batch.
#[derive(Debug)]
pub enum FileStatus {
    Compressed {
        original: (u32, u32),
        output: (u32, u32),
        bytes_before: u64,
        bytes_after: u64,
        output_path: PathBuf,
    },
    /// Dry run: what would have been written.
    Planned {
        original: (u32, u32),
        output: (u32, u32),
        output_path: PathBuf,
    },
    Failed {
        error: CompressionError,
    },
}

impl FileStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, FileStatus::Failed { .. })
    }

    pub fn was_resized(&self) -> bool {
        match self {
            FileStatus::Compressed {
                original, output, ..
            }
            | FileStatus::Planned {
                original, output, ..
            } => original != output,
            FileStatus::Failed { .. } => false,
        }
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileReport {
    pub fn new(path: PathBuf, status: FileStatus) -> Self {
        Self { path, status }
    }

    pub fn failed(path: PathBuf, error: CompressionError) -> Self {
        Self::new(path, FileStatus::Failed { error })
    }

    /// File name for log lines, falling back to the full path.
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Everything that happened during one run, in listing order.
#[derive(Debug)]
pub struct BatchReport {
    pub directory: PathBuf,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(directory: PathBuf, files: Vec<FileReport>) -> Self {
        Self { directory, files }
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn compressed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Compressed { .. }))
            .count()
    }

    pub fn planned(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Planned { .. }))
            .count()
    }

    pub fn resized(&self) -> usize {
        self.files.iter().filter(|f| f.status.was_resized()).count()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|f| f.status.is_failure())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.status.is_failure())
    }

    /// Sum of (before, after) sizes over the files that were rewritten.
    pub fn total_bytes(&self) -> (u64, u64) {
        self.files
            .iter()
            .fold((0, 0), |(before, after), file| match &file.status {
                FileStatus::Compressed {
                    bytes_before,
                    bytes_after,
                    ..
                } => (before + bytes_before, after + bytes_after),
                _ => (before, after),
            })
    }

    pub fn print_summary(&self) {
        let (before, after) = self.total_bytes();

        crate::info!("\n{} Batch Compression Summary:", SUMMARY_PREFIX);
        crate::info!("  📁 Directory: {}", self.directory.display());
        crate::info!("  📁 Image files found: {}", self.total());
        if self.planned() > 0 {
            crate::info!("  📝 Planned (dry run): {}", self.planned());
        }
        crate::info!("  ✅ Compressed: {}", self.compressed());
        crate::info!("  📏 Resized: {}", self.resized());
        if self.compressed() > 0 {
            crate::info!(
                "  📊 Total size: {} -> {}",
                format_file_size(before),
                format_file_size(after)
            );
            crate::info!(
                "  {} Overall compression ratio: {:.1}%",
                RATIO_PREFIX,
                calculate_compression_ratio(before, after)
            );
        }

        if self.has_failures() {
            crate::warn!("Failed files: {}", self.failed());
            for file in self.failures() {
                if let FileStatus::Failed { error } = &file.status {
                    crate::warn!("  {}: {}", file.display_name(), error);
                }
            }
        }
    }
}
