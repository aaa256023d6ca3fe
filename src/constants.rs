pub const DEFAULT_GALLERY_DIR: &str = "src/assets/gallery";

pub const DEFAULT_MAX_DIMENSION: u32 = 1200;
pub const DEFAULT_QUALITY: u8 = 70;
pub const MIN_QUALITY: u8 = 0;
pub const MAX_QUALITY: u8 = 100;

/// Baseline JPEG stores each dimension in 16 bits.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
pub const RENAMED_EXTENSION: &str = "jpg";

pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

// Common output message prefixes
pub const START_PREFIX: &str = "🚀";
pub const SUCCESS_PREFIX: &str = "✅";
pub const PLAN_PREFIX: &str = "📝";
pub const SUMMARY_PREFIX: &str = "📊";
pub const RATIO_PREFIX: &str = "🎯";
