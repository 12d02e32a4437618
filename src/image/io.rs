//! I/O helpers for colour inputs, label maps, saliency maps and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned packed RGB buffer.
//! - `load_grayscale_f32`: read an image as a single-channel field in `[0, 1]`.
//! - `load_label_map`: read a 8/16-bit grayscale image whose values are labels.
//! - `save_grayscale_f32`: write an `ImageF32` to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageView, RgbImage8};
use crate::error::{SaliencyError, SaliencyResult};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned packed RGB buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbBuffer {
    width: usize,
    height: usize,
    data: Vec<[u8; 3]>,
}

impl RgbBuffer {
    pub fn new(width: usize, height: usize, data: Vec<[u8; 3]>) -> SaliencyResult<Self> {
        if data.len() != width * height {
            return Err(SaliencyError::BufferLength {
                got: data.len(),
                expected: width * height,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `RgbImage8` view
    pub fn as_view(&self) -> RgbImage8<'_> {
        RgbImage8 {
            w: self.width,
            h: self.height,
            data: &self.data,
        }
    }
}

/// Label map decoded from an image file, one label per pixel.
#[derive(Clone, Debug)]
pub struct LabelMap {
    pub width: usize,
    pub height: usize,
    pub labels: Vec<u32>,
}

fn image_error(path: &Path, e: impl std::fmt::Display) -> SaliencyError {
    SaliencyError::Image {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn io_error(path: &Path, e: impl std::fmt::Display) -> SaliencyError {
    SaliencyError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Load an image from disk and convert to packed 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> SaliencyResult<RgbBuffer> {
    let img = image::open(path)
        .map_err(|e| image_error(path, e))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.pixels().map(|p| p.0).collect();
    RgbBuffer::new(width, height, data)
}

/// Load an image as a grayscale field scaled into `[0, 1]`.
pub fn load_grayscale_f32(path: &Path) -> SaliencyResult<ImageF32> {
    let img = image::open(path)
        .map_err(|e| image_error(path, e))?
        .into_luma16();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / u16::MAX as f32)
        .collect();
    ImageF32::from_vec(width, height, data)
}

/// Load a label map; each distinct gray level is one region label.
pub fn load_label_map(path: &Path) -> SaliencyResult<LabelMap> {
    let img = image::open(path)
        .map_err(|e| image_error(path, e))?
        .into_luma16();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let labels = img.into_raw().into_iter().map(u32::from).collect();
    Ok(LabelMap {
        width,
        height,
        labels,
    })
}

/// Save a float image to a grayscale PNG, mapping `[0, 1]` onto `[0, 255]`.
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> SaliencyResult<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path).map_err(|e| image_error(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> SaliencyResult<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| io_error(path, e))?;
    fs::write(path, json).map_err(|e| io_error(path, e))
}

fn ensure_parent_dir(path: &Path) -> SaliencyResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
    }
    Ok(())
}
