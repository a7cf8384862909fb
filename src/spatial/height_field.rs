//! Normalized per-pixel height grid derived from a height source image
//!
//! Heights are stored row-major as an `Array2<u8>` of shape (height, width)
//! and addressed by canvas `(x, y)`. Values span the full 0-255 range
//! unless the source is flat, in which case the field is all zeros.

use crate::io::error::DegenerateGeometry;
use image::RgbImage;
use ndarray::Array2;

/// Immutable height grid with the same pixel dimensions as its source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightField {
    heights: Array2<u8>,
}

impl HeightField {
    /// Wrap an existing grid of shape (height, width)
    pub const fn from_array(heights: Array2<u8>) -> Self {
        Self { heights }
    }

    /// Grid of the given size filled with a single height
    pub fn flat(width: usize, height: usize, value: u8) -> Self {
        Self {
            heights: Array2::from_elem((height, width), value),
        }
    }

    /// Min-max normalize the per-pixel channel mean into 0-255
    pub fn from_rgb(img: &RgbImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);

        let mut means = Array2::<f64>::zeros((height, width));
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for (x, y, pixel) in img.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            let mean = (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0;
            min = min.min(mean);
            max = max.max(mean);
            if let Some(cell) = means.get_mut((y as usize, x as usize)) {
                *cell = mean;
            }
        }

        let range = max - min;
        if range <= 0.0 || !range.is_finite() {
            return Self::flat(width, height, 0);
        }

        let heights =
            means.mapv(|mean| ((mean - min) / range * 255.0).round().clamp(0.0, 255.0) as u8);
        Self { heights }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.heights.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.heights.nrows()
    }

    /// Whether the field holds no samples yet
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        self.heights.get((row, col)).copied()
    }

    /// Whether `(x, y)` lies inside the grid
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.get(x, y).is_some()
    }

    /// Reports a flat field, which produces no gradients or displacement
    pub fn degeneracy(&self) -> Option<DegenerateGeometry> {
        let first = self.heights.iter().next().copied();
        let flat = first.is_some_and(|value| self.heights.iter().all(|&h| h == value));
        flat.then_some(DegenerateGeometry::FlatHeightField)
    }

    /// Underlying grid of shape (height, width)
    pub const fn heights(&self) -> &Array2<u8> {
        &self.heights
    }
}
