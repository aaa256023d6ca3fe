use crate::batch::BatchConfig;
use crate::constants::{DEFAULT_GALLERY_DIR, DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY};
use crate::error::Result;
use crate::processing::{CompressionOptions, OutputNaming};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gallery-squeeze",
    about = "Shrink oversized gallery images and re-encode them as JPEG, in place",
    long_about = "gallery-squeeze lists a single directory and rewrites every png, jpg, jpeg and webp file in it. \
                  Images whose longer edge exceeds the maximum dimension are downsampled with a Lanczos3 filter, \
                  alpha channels are dropped, and the result is saved as an optimized JPEG over the original file. \
                  There is no backup: run it on a copy if you need the originals.",
    version,
    after_help = "EXAMPLES:\n  \
    gallery-squeeze\n  \
    gallery-squeeze ./photos -m 1600 -q 80\n  \
    gallery-squeeze ./photos --rename-to-jpg -j 4\n  \
    gallery-squeeze ./photos --dry-run"
)]
pub struct Args {
    #[arg(
        default_value = DEFAULT_GALLERY_DIR,
        help = "Directory whose images are compressed in place",
        long_help = "Directory to process. Only files directly inside it are considered; \
                     subdirectories are left alone."
    )]
    pub directory: PathBuf,

    #[arg(
        short = 'm',
        long,
        default_value_t = DEFAULT_MAX_DIMENSION,
        help = "Maximum length of the longer edge in pixels",
        long_help = "Images whose width or height exceeds this value are downsampled so that \
                     the longer edge equals it, preserving the aspect ratio. Smaller images keep their size."
    )]
    pub max_dimension: u32,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_QUALITY,
        help = "JPEG quality (0-100)",
        long_help = "JPEG quality from 0 (smallest file) to 100 (best quality). \
                     Every run re-encodes, so repeated runs keep losing detail."
    )]
    pub quality: u8,

    #[arg(
        long,
        help = "Save non-JPEG files under a .jpg name",
        long_help = "By default a png or webp file is overwritten with JPEG bytes under its original name. \
                     With this flag the output goes to a .jpg file next to it and the original is removed. \
                     A file is skipped with an error if the .jpg name is already taken."
    )]
    pub rename_to_jpg: bool,

    #[arg(
        short = 'j',
        long,
        help = "Number of worker threads (default: sequential)",
        long_help = "Process files on a pool of this many threads. Omit or pass 1 to process files one at a time."
    )]
    pub jobs: Option<usize>,

    #[arg(
        short = 'n',
        long,
        help = "Report what would change without writing anything"
    )]
    pub dry_run: bool,

    #[arg(
        long,
        help = "Exit with status 0 even when some files failed"
    )]
    pub allow_failures: bool,

    #[arg(long, conflicts_with = "verbose", help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print dimensions and sizes for every file")]
    pub verbose: bool,
}

impl Args {
    pub fn naming(&self) -> OutputNaming {
        if self.rename_to_jpg {
            OutputNaming::RenameToJpg
        } else {
            OutputNaming::KeepOriginal
        }
    }

    /// Validates the numeric options and builds the batch configuration.
    pub fn to_batch_config(&self) -> Result<BatchConfig> {
        let options =
            CompressionOptions::new(Some(self.max_dimension), Some(self.quality), self.naming())?;
        Ok(BatchConfig::new(self.directory.clone(), options)
            .with_jobs(self.jobs)
            .with_dry_run(self.dry_run))
    }
}
