//! Raster loading, canvas fitting and PNG export

use crate::io::configuration::OUTPUT_SUFFIX;
use crate::io::error::{Result, ShadowError, file_system_error};
use image::imageops::{self, FilterType};
use image::{RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

/// Decode the image at `path` into 8-bit RGB
///
/// # Errors
///
/// Returns [`ShadowError::ImageDecode`] if the file is missing, unreadable
/// or not a supported raster format
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| ShadowError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Scale `img` to cover a `width`×`height` canvas, then crop the centre
///
/// The aspect ratio is preserved, so the overflowing axis loses an equal
/// margin on both sides.
pub fn fit_display_to_canvas(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (source_width, source_height) = img.dimensions();
    if source_width == 0 || source_height == 0 || width == 0 || height == 0 {
        return RgbImage::new(width, height);
    }

    let scale = (f64::from(width) / f64::from(source_width))
        .max(f64::from(height) / f64::from(source_height));
    let scaled_width = ((f64::from(source_width) * scale).ceil() as u32).max(width);
    let scaled_height = ((f64::from(source_height) * scale).ceil() as u32).max(height);

    let scaled = imageops::resize(img, scaled_width, scaled_height, FilterType::Triangle);
    let left = (scaled_width - width) / 2;
    let top = (scaled_height - height) / 2;
    imageops::crop_imm(&scaled, left, top, width, height).to_image()
}

/// Resize `img` to exactly `width`×`height`, ignoring its aspect ratio
pub fn stretch_to_canvas(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    if img.width() == width && img.height() == height {
        return img.clone();
    }
    imageops::resize(img, width, height, FilterType::Triangle)
}

/// Ensure the display and height source line up pixel for pixel
///
/// # Errors
///
/// Returns [`ShadowError::ImageDimensionMismatch`] when the sizes differ
pub fn check_dimensions(display: &RgbImage, height_source: &RgbImage) -> Result<()> {
    if display.dimensions() == height_source.dimensions() {
        Ok(())
    } else {
        Err(ShadowError::ImageDimensionMismatch {
            display: display.dimensions(),
            height: height_source.dimensions(),
        })
    }
}

/// Output path next to `display`: `<stem>_shadow.<extension>`
pub fn output_path(display: &Path, extension: &str) -> PathBuf {
    let stem = display
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    display.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{extension}"))
}

/// Create the parent directory of `path` if it does not exist
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e)),
        _ => Ok(()),
    }
}

/// Save a composited frame as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ShadowError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
}
