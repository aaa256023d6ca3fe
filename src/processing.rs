use crate::constants::{
    DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY, JPEG_EXTENSIONS, MAX_JPEG_DIMENSION, MAX_QUALITY,
    MIN_QUALITY, RENAMED_EXTENSION,
};
use crate::error::{CompressionError, Result};
use crate::report::FileStatus;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageReader};
use jpeg_encoder::Encoder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the re-encoded bytes end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputNaming {
    /// Overwrite the source path, even when its extension is not `.jpg`.
    #[default]
    KeepOriginal,
    /// Write to a `.jpg` sibling and remove the source.
    RenameToJpg,
}

#[derive(Debug, Clone)]
pub struct CompressionOptions {
    pub max_dimension: u32,
    pub quality: u8,
    pub naming: OutputNaming,
}

impl CompressionOptions {
    pub fn new(
        max_dimension: Option<u32>,
        quality: Option<u8>,
        naming: OutputNaming,
    ) -> Result<Self> {
        let max_dimension = max_dimension.unwrap_or(DEFAULT_MAX_DIMENSION);
        if max_dimension == 0 {
            return Err(CompressionError::InvalidMaxDimension(max_dimension));
        }

        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }

        Ok(Self {
            max_dimension,
            quality,
            naming,
        })
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_QUALITY,
            naming: OutputNaming::default(),
        }
    }
}

/// Pixel data ready for the JPEG encoder.
#[derive(Debug)]
pub enum FlatImage {
    Luma(image::GrayImage),
    Rgb(image::RgbImage),
}

impl FlatImage {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            FlatImage::Luma(img) => img.dimensions(),
            FlatImage::Rgb(img) => img.dimensions(),
        }
    }
}

/// Computes the size an image should have so that its long edge is at most
/// `max_dimension`.
///
/// The long edge is set to exactly `max_dimension` and the short edge is
/// scaled by the same factor and rounded, never below one pixel. Images that
/// already fit are returned unchanged.
///
/// # Example
/// ```
/// use gallery_squeeze::target_dimensions;
///
/// assert_eq!(target_dimensions(4000, 2000, 1200), (1200, 600));
/// assert_eq!(target_dimensions(800, 600, 1200), (800, 600));
/// ```
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let long_edge = width.max(height);
    if long_edge <= max_dimension {
        return (width, height);
    }

    let scale = max_dimension as f64 / long_edge as f64;
    let scale_edge = |edge: u32| ((edge as f64 * scale).round() as u32).max(1);

    if width >= height {
        (max_dimension, scale_edge(height))
    } else {
        (scale_edge(width), max_dimension)
    }
}

/// Loads an image file and returns it along with its size in bytes.
///
/// The format is guessed from the file content rather than the extension, so
/// a `.png` that already holds JPEG bytes from an earlier run still decodes.
/// The file handle is released before this returns.
pub fn load_image(input_path: &Path) -> Result<(DynamicImage, u64)> {
    let file_size = fs::metadata(input_path)?.len();
    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;
    Ok((img, file_size))
}

/// Reads only the header to get the pixel dimensions.
pub fn read_dimensions(input_path: &Path) -> Result<(u32, u32)> {
    let dimensions = ImageReader::open(input_path)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dimensions)
}

/// Downsamples `img` with Lanczos3 when its long edge exceeds the configured
/// maximum. Returns `true` when the image was resized.
pub fn resize_image(img: &mut DynamicImage, options: &CompressionOptions) -> bool {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, options.max_dimension);
    if (new_width, new_height) == (width, height) {
        return false;
    }

    crate::verbose!(
        "Resizing {}x{} -> {}x{}",
        width,
        height,
        new_width,
        new_height
    );
    *img = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
    true
}

/// Converts an image into something JPEG can hold.
///
/// JPEG has no alpha channel and no palette. Alpha is dropped, not composited
/// against a background, so transparent regions keep whatever colour their
/// pixels carried. Indexed images arrive already expanded to RGB(A) from the
/// decoder and are handled the same way. Plain greyscale stays single channel.
pub fn flatten_for_jpeg(img: DynamicImage) -> FlatImage {
    match img.color() {
        ColorType::L8 => FlatImage::Luma(img.into_luma8()),
        ColorType::L16 => FlatImage::Luma(img.to_luma8()),
        ColorType::Rgb8 => FlatImage::Rgb(img.into_rgb8()),
        _ => FlatImage::Rgb(img.to_rgb8()),
    }
}

/// Encodes flattened pixels as baseline JPEG with optimized Huffman tables.
pub fn encode_jpeg(img: &FlatImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    if width > MAX_JPEG_DIMENSION || height > MAX_JPEG_DIMENSION {
        return Err(CompressionError::DimensionsTooLarge(
            width,
            height,
            MAX_JPEG_DIMENSION,
        ));
    }

    let mut buf = Vec::new();
    // The encoder's quality scale starts at 1; 0 means "as small as possible".
    let mut encoder = Encoder::new(&mut buf, quality.max(1));
    encoder.set_optimized_huffman_tables(true);

    match img {
        FlatImage::Luma(pixels) => encoder.encode(
            pixels.as_raw(),
            width as u16,
            height as u16,
            jpeg_encoder::ColorType::Luma,
        )?,
        FlatImage::Rgb(pixels) => encoder.encode(
            pixels.as_raw(),
            width as u16,
            height as u16,
            jpeg_encoder::ColorType::Rgb,
        )?,
    }

    Ok(buf)
}

fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| JPEG_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Path the re-encoded bytes are written to.
pub fn output_path_for(input_path: &Path, naming: OutputNaming) -> PathBuf {
    match naming {
        OutputNaming::KeepOriginal => input_path.to_path_buf(),
        OutputNaming::RenameToJpg if has_jpeg_extension(input_path) => input_path.to_path_buf(),
        OutputNaming::RenameToJpg => input_path.with_extension(RENAMED_EXTENSION),
    }
}

/// Replaces `output_path` with `bytes` atomically and returns the number of
/// bytes written.
///
/// The data goes to a temporary file in the same directory which is then
/// renamed over the destination, so a failed write never leaves a truncated
/// image behind. When `output_path` differs from `input_path` it must not
/// exist yet; the source is removed once the new file is in place.
pub fn write_in_place(bytes: &[u8], input_path: &Path, output_path: &Path) -> Result<u64> {
    let renaming = input_path != output_path;
    if renaming && output_path.exists() {
        return Err(CompressionError::OutputExists(output_path.to_path_buf()));
    }

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Temp files are created 0600; keep the source's mode instead.
    let permissions = fs::metadata(input_path)?.permissions();

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().set_permissions(permissions)?;
    temp.as_file().sync_all()?;

    if renaming {
        temp.persist_noclobber(output_path)
            .map_err(|e| CompressionError::TempFilePersist(output_path.to_path_buf(), e.error))?;
        // The new file is in place; a leftover source is not worth failing over.
        if let Err(e) = fs::remove_file(input_path) {
            crate::warn!(
                "Wrote {} but could not remove {}: {}",
                output_path.display(),
                input_path.display(),
                e
            );
        }
    } else {
        temp.persist(output_path)
            .map_err(|e| CompressionError::TempFilePersist(output_path.to_path_buf(), e.error))?;
    }

    Ok(bytes.len() as u64)
}

/// Runs the whole per-file workflow: load -> resize -> flatten -> encode -> write.
///
/// Everything up to the final write happens in memory, so any error leaves
/// the source file as it was.
pub fn process_image_pipeline(input_path: &Path, options: &CompressionOptions) -> Result<FileStatus> {
    let (mut img, bytes_before) = load_image(input_path)?;
    let original = img.dimensions();

    resize_image(&mut img, options);
    let output = img.dimensions();

    let flat = flatten_for_jpeg(img);
    let encoded = encode_jpeg(&flat, options.quality)?;

    let output_path = output_path_for(input_path, options.naming);
    let bytes_after = write_in_place(&encoded, input_path, &output_path)?;

    Ok(FileStatus::Compressed {
        original,
        output,
        bytes_before,
        bytes_after,
        output_path,
    })
}

/// Works out what [`process_image_pipeline`] would do without writing anything.
pub fn plan_image(input_path: &Path, options: &CompressionOptions) -> Result<FileStatus> {
    let (width, height) = read_dimensions(input_path)?;
    Ok(FileStatus::Planned {
        original: (width, height),
        output: target_dimensions(width, height, options.max_dimension),
        output_path: output_path_for(input_path, options.naming),
    })
}
