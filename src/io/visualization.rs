//! Shadow compositing and GIF generation for replayed sessions

use crate::algorithm::renderer::{DrawBatch, Frame};
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{Result, ShadowError, file_system_error};
use crate::io::image::ensure_parent_dir;
use crate::spatial::Point;
use image::codecs::gif::GifEncoder;
use image::{Delay, Rgba, RgbImage, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Hold the final GIF frame this many times longer than the others
const FINAL_FRAME_HOLD: u32 = 25;

/// Draw `frame` over `base` as black shadow
///
/// Each batch's cells are merged into one coverage mask and filled once at
/// the batch opacity, faintest batch first, so overlapping cells of the same
/// level never darken twice.
pub fn composite_frame(base: &RgbImage, frame: &Frame) -> RgbaImage {
    let mut output = RgbaImage::from_fn(base.width(), base.height(), |x, y| {
        let [r, g, b] = base.get_pixel(x, y).0;
        Rgba([r, g, b, u8::MAX])
    });

    for batch in &frame.batches {
        let coverage = batch_coverage(frame, batch, base.width(), base.height());
        let keep = 1.0 - batch.opacity().clamp(0.0, 1.0);

        for ((y, x), covered) in coverage.indexed_iter() {
            if !covered {
                continue;
            }
            let pixel = output.get_pixel_mut(x as u32, y as u32);
            for channel in pixel.0.iter_mut().take(3) {
                *channel = (f64::from(*channel) * keep).round() as u8;
            }
        }
    }

    output
}

/// Pixels whose centre falls inside any cell of `batch`, shape (height, width)
pub fn batch_coverage(frame: &Frame, batch: &DrawBatch, width: u32, height: u32) -> Array2<bool> {
    let mut coverage = Array2::from_elem((height as usize, width as usize), false);
    if width == 0 || height == 0 {
        return coverage;
    }

    for cell in &batch.cells {
        let corners = [
            Point::new(cell.x, cell.y),
            Point::new(cell.x + cell.size, cell.y),
            Point::new(cell.x, cell.y + cell.size),
            Point::new(cell.x + cell.size, cell.y + cell.size),
        ]
        .map(|corner| frame.to_canvas(corner));

        let (min_x, max_x) = span(corners.iter().map(|c| c.x), width);
        let (min_y, max_y) = span(corners.iter().map(|c| c.y), height);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let centre = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                let local = frame.to_local(centre);
                if cell.contains(local.x, local.y) {
                    if let Some(covered) = coverage.get_mut([py, px]) {
                        *covered = true;
                    }
                }
            }
        }
    }

    coverage
}

// Pixel range covering the given coordinates, clipped to [0, limit)
fn span(values: impl Iterator<Item = f64>, limit: u32) -> (usize, usize) {
    let (low, high) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let limit = f64::from(limit);
    let low = low.floor().clamp(0.0, limit) as usize;
    let high = high.ceil().clamp(0.0, limit) as usize;
    (low, high)
}

/// Records one frame per pointer event for later animation export
#[derive(Debug, Default)]
pub struct FrameCapture {
    frames: Vec<Frame>,
}

impl FrameCapture {
    /// Capture with room for `expected` frames
    pub fn with_capacity(expected: usize) -> Self {
        Self {
            frames: Vec::with_capacity(expected),
        }
    }

    /// Record the frame produced by one event
    pub fn record(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Recorded frames in event order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Indices of the frames that make it into an animation
    ///
    /// Frame rates above what viewers display are thinned to every
    /// `skip`-th frame; the last frame is always kept.
    pub fn exported_indices(&self, frame_delay_ms: u32) -> Vec<usize> {
        let skip = skip_factor(frame_delay_ms);
        let mut indices: Vec<usize> = (0..self.frames.len()).step_by(skip).collect();
        if let Some(last) = self.frames.len().checked_sub(1) {
            if indices.last() != Some(&last) {
                indices.push(last);
            }
        }
        indices
    }

    /// Composite every kept frame over `base` and write an animated GIF
    ///
    /// Automatically skips frames if the requested frame rate exceeds viewer capabilities.
    /// With `GIF_FRAME_DELAY_MS` at 16 ms and viewers limited to 50 ms, every 4th
    /// frame is kept and shown for 50 ms.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, base: &RgbImage, path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(ShadowError::EmptyCapture);
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let indices = self.exported_indices(frame_delay_ms);

        ensure_parent_dir(path)?;
        let file =
            std::fs::File::create(path).map_err(|e| file_system_error(path, "create file", e))?;
        let mut encoder = GifEncoder::new(file);
        let export_error = |source| ShadowError::ImageExport {
            path: path.to_path_buf(),
            source,
        };

        for frame in indices.iter().filter_map(|&i| self.frames.get(i)) {
            encoder
                .encode_frame(gif_frame(composite_frame(base, frame), delay_ms))
                .map_err(export_error)?;
        }

        // Final frame displays longer for better visibility
        if let Some(frame) = indices.last().and_then(|&i| self.frames.get(i)) {
            encoder
                .encode_frame(gif_frame(
                    composite_frame(base, frame),
                    delay_ms * FINAL_FRAME_HOLD,
                ))
                .map_err(export_error)?;
        }

        log::info!(
            "Wrote {} of {} frames to {}",
            indices.len(),
            self.frames.len(),
            path.display()
        );
        Ok(())
    }
}

/// Keep every n-th frame so the apparent speed survives a viewer's minimum delay
pub const fn skip_factor(frame_delay_ms: u32) -> usize {
    if frame_delay_ms == 0 {
        return VIEWER_MIN_FRAME_DELAY_MS as usize;
    }
    if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
        VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
    } else {
        1
    }
}

fn gif_frame(img: RgbaImage, delay_ms: u32) -> image::Frame {
    image::Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
}

