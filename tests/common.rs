#![allow(dead_code)]

use image::{ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub fn write_png_with_alpha(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, ((x + y) % 256) as u8])
    })
    .save_with_format(&path, image::ImageFormat::Png)
    .unwrap();
    path
}

/// Palette PNG whose palette entries carry transparency through a tRNS chunk.
pub fn write_indexed_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let file = fs::File::create(&path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]);
    encoder.set_trns(vec![255, 128, 0, 255]);

    let indices: Vec<u8> = (0..width * height).map(|i| (i % 4) as u8).collect();
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&indices).unwrap();
    writer.finish().unwrap();
    path
}

pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient(width, height)
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .unwrap();
    path
}

pub fn write_webp(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient(width, height)
        .save_with_format(&path, image::ImageFormat::WebP)
        .unwrap();
    path
}

pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"\xFF\xD8 this is not really a jpeg").unwrap();
    path
}

pub fn write_text(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not an image").unwrap();
    path
}

/// Dimensions sniffed from content, ignoring the extension.
pub fn dimensions(path: &Path) -> (u32, u32) {
    ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .into_dimensions()
        .unwrap()
}

pub fn is_jpeg(path: &Path) -> bool {
    let bytes = fs::read(path).unwrap();
    bytes.len() > 4
        && bytes[..3] == [0xFF, 0xD8, 0xFF]
        && bytes[bytes.len() - 2..] == [0xFF, 0xD9]
        && image::load_from_memory_with_format(&bytes, image::ImageFormat::Jpeg).is_ok()
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    })
}
