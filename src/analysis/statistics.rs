//! Roughness and brightness indices over a centred sampling disk
//!
//! Both indices summarize the middle of the canvas, where the subject of a
//! generated image sits, and feed parameter calibration.

use crate::io::configuration::{LUMINANCE_WEIGHTS, MAX_EXPECTED_STD_DEV, SAMPLING_DISK_RATIO};
use crate::io::error::DegenerateGeometry;
use crate::spatial::HeightField;
use image::RgbImage;

/// Disk of pixels the statistics are gathered from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingDisk {
    /// Centre x in pixels
    pub cx: f64,
    /// Centre y in pixels
    pub cy: f64,
    /// Radius in pixels
    pub radius: f64,
}

impl SamplingDisk {
    /// Disk centred on a `width` × `height` grid, with diameter
    /// `SAMPLING_DISK_RATIO` × `reference_height`
    pub fn centred(width: usize, height: usize, reference_height: f64) -> Self {
        Self {
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            radius: reference_height * SAMPLING_DISK_RATIO / 2.0,
        }
    }

    /// All integer pixel positions inside the disk, clipped to the grid
    pub fn pixels(&self, width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
        let Self { cx, cy, radius } = *self;
        let radius_sq = radius * radius;

        let min_x = (cx - radius).max(0.0) as usize;
        let max_x = (cx + radius).min(width as f64).max(0.0) as usize;
        let min_y = (cy - radius).max(0.0) as usize;
        let max_y = (cy + radius).min(height as f64).max(0.0) as usize;

        (min_x..max_x).flat_map(move |x| {
            (min_y..max_y).filter_map(move |y| {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                (dx.mul_add(dx, dy * dy) <= radius_sq).then_some((x, y))
            })
        })
    }
}

/// Summary statistics of one loaded image pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageStatistics {
    /// Population standard deviation of heights inside the disk
    pub height_std_dev: f64,
    /// `height_std_dev / 127.5`, clamped to [0, 1]
    pub roughness_index: f64,
    /// Mean luminance of display pixels inside the disk
    pub brightness_mean: f64,
    /// Median luminance of display pixels inside the disk
    pub brightness_median: f64,
    /// `brightness_mean / 255`, clamped to [0, 1]
    pub brightness_index: f64,
    /// Set when the disk held no samples and the indices defaulted to zero
    pub degeneracy: Option<DegenerateGeometry>,
}

impl ImageStatistics {
    /// Compute both indices for a display image and its height field
    pub fn compute(image: &RgbImage, field: &HeightField, reference_height: f64) -> Self {
        let height_std_dev = height_std_dev(field, reference_height);
        let luminance = disk_luminance(image, reference_height);

        let degeneracy = (height_std_dev.is_none() || luminance.is_empty())
            .then_some(DegenerateGeometry::EmptySamplingDisk);
        if let Some(warning) = degeneracy {
            log::warn!("Image statistics defaulted to zero: {warning}");
        }

        let height_std_dev = height_std_dev.unwrap_or(0.0);
        let (brightness_mean, brightness_median) = mean_and_median(luminance).unwrap_or((0.0, 0.0));

        Self {
            height_std_dev,
            roughness_index: (height_std_dev / MAX_EXPECTED_STD_DEV).clamp(0.0, 1.0),
            brightness_mean,
            brightness_median,
            brightness_index: (brightness_mean / 255.0).clamp(0.0, 1.0),
            degeneracy,
        }
    }
}

/// Perceptual luminance of an 8-bit RGB triple
pub fn luminance([r, g, b]: [u8; 3]) -> f64 {
    let [wr, wg, wb] = LUMINANCE_WEIGHTS;
    wr.mul_add(f64::from(r), wg.mul_add(f64::from(g), wb * f64::from(b)))
}

fn height_std_dev(field: &HeightField, reference_height: f64) -> Option<f64> {
    let (width, height) = (field.width(), field.height());
    let disk = SamplingDisk::centred(width, height, reference_height);

    let samples: Vec<f64> = disk
        .pixels(width, height)
        .filter_map(|(x, y)| field.heights().get((y, x)).copied())
        .map(f64::from)
        .collect();

    if samples.is_empty() {
        return None;
    }

    let count = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / count;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count;
    Some(variance.sqrt())
}

fn disk_luminance(image: &RgbImage, reference_height: f64) -> Vec<f64> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let disk = SamplingDisk::centred(width, height, reference_height);

    disk.pixels(width, height)
        .filter_map(|(x, y)| image.get_pixel_checked(x as u32, y as u32))
        .map(|pixel| luminance(pixel.0))
        .collect()
}

fn mean_and_median(mut values: Vec<f64>) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;

    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 1 {
        values.get(mid).copied()?
    } else {
        let low = values.get(mid - 1).copied()?;
        let high = values.get(mid).copied()?;
        f64::midpoint(low, high)
    };

    Some((mean, median))
}
