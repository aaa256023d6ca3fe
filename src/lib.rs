pub mod constants;
#[macro_use]
pub mod logger;
pub mod batch;
pub mod cli;
pub mod error;
pub mod processing;
pub mod report;
pub mod utils;

pub use batch::{batch_compress_images, collect_image_files, is_image_file, BatchConfig};
pub use error::{CompressionError, Result};
pub use processing::{
    encode_jpeg, flatten_for_jpeg, load_image, output_path_for, plan_image,
    process_image_pipeline, resize_image, target_dimensions, write_in_place, CompressionOptions,
    FlatImage, OutputNaming,
};
pub use report::{BatchReport, FileReport, FileStatus};
