//! Procedural shadow silhouette rasterization
//!
//! The silhouette is laid out in a local frame whose x axis points along
//! the pen's lean and whose origin is the shadow anchor. It is walked in
//! square cells; each cell is pushed sideways by the height difference
//! between the terrain under it and the terrain under the anchor, which
//! makes the shadow bend over bumps the way a real cast shadow would.
//!
//! Cells are quantized into ten opacity buckets so a frame is drawn with at
//! most ten fills regardless of how many cells it holds.

use crate::algorithm::smoothing::SmoothedSignals;
use crate::analysis::binding::RenderParams;
use crate::io::configuration::{
    CURSOR_SHADOW_LENGTH, CURSOR_THETA, DISPLACEMENT_DIRECTION_OFFSET, LENGTH_FADE_START,
    MIN_CELL_OPACITY, OPACITY_BUCKETS, SHADOW_BASE_LENGTH, SHADOW_CELL_SIZE,
    TILT_FULL_OPACITY_ANGLE, WIDTH_FADE_START,
};
use crate::spatial::{CursorShape, HeightField, Point, ShapeProfile};

/// One square shadow cell in the frame's local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    /// Left edge along the pen axis
    pub x: f64,
    /// Top edge across the pen axis
    pub y: f64,
    /// Edge length
    pub size: f64,
}

impl CellRect {
    /// Whether the local point `(x, y)` lies inside the cell
    pub const fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.size && y >= self.y && y < self.y + self.size
    }
}

/// All cells sharing one opacity level
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    /// Opacity level in 1..=10
    pub bucket: u8,
    /// Cells filled at this level
    pub cells: Vec<CellRect>,
}

impl DrawBatch {
    /// Fill opacity of this batch
    pub fn opacity(&self) -> f64 {
        f64::from(self.bucket) / f64::from(OPACITY_BUCKETS)
    }
}

/// Draw commands for one frame
///
/// Batches are ordered from the faintest to the most opaque level.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Canvas position of the local origin
    pub origin: Point,
    /// Rotation of the local frame in radians
    pub rotation: f64,
    /// Non-empty batches in ascending bucket order
    pub batches: Vec<DrawBatch>,
}

impl Frame {
    /// Frame with nothing to draw
    pub const fn empty() -> Self {
        Self {
            origin: Point::new(0.0, 0.0),
            rotation: 0.0,
            batches: Vec::new(),
        }
    }

    /// Whether the frame draws nothing
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Total number of cells across all batches
    pub fn cell_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.cells.len()).sum()
    }

    /// Every cell with its opacity bucket, faintest first
    pub fn commands(&self) -> impl Iterator<Item = (CellRect, u8)> + '_ {
        self.batches
            .iter()
            .flat_map(|batch| batch.cells.iter().map(move |cell| (*cell, batch.bucket)))
    }

    /// Map a local point to canvas coordinates
    pub fn to_canvas(&self, local: Point) -> Point {
        self.origin + local.rotated(self.rotation)
    }

    /// Map a canvas point into local coordinates
    pub fn to_local(&self, canvas: Point) -> Point {
        (canvas - self.origin).rotated(-self.rotation)
    }
}

/// Silhouette layout derived from the cursor shape and pen signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowGeometry {
    /// Direction of the shadow in radians
    pub theta: f64,
    /// Pen lean used for the visibility gate
    pub angle: f64,
    /// Length of the shadow along its axis
    pub length: f64,
    /// Profile entries advanced per unit of length
    pub x_step: f64,
    /// Fixed cursor geometry without fades or tilt gating
    pub fixed: bool,
}

impl ShadowGeometry {
    /// Layout for `shape` given the current smoothed signals
    ///
    /// A flatter pen gives a longer shadow: the profile is walked with a
    /// stride of `max(1, (1 - angle) * 2)` and the length shrinks by the same
    /// factor from 200.
    pub fn new(shape: CursorShape, signals: &SmoothedSignals) -> Self {
        if shape.is_fixed() {
            return Self {
                theta: CURSOR_THETA,
                angle: 0.0,
                length: CURSOR_SHADOW_LENGTH,
                x_step: 1.0,
                fixed: true,
            };
        }

        let x_step = ((1.0 - signals.angle) * 2.0).max(1.0);
        Self {
            theta: signals.theta,
            angle: signals.angle,
            length: SHADOW_BASE_LENGTH / x_step,
            x_step,
            fixed: false,
        }
    }
}

/// Opacity gate from the pen's lean
///
/// Zero below π/18, a linear ramp up to `transparency` at π/9, and full
/// `transparency` above that, so a nearly upright pen casts no shadow.
pub fn tilt_opacity(angle: f64, transparency: f64) -> f64 {
    let full = TILT_FULL_OPACITY_ANGLE;
    if angle < full && angle > full / 2.0 {
        transparency * 2.0f64.mul_add(angle, -full) / full
    } else if angle < full {
        0.0
    } else {
        transparency
    }
}

/// Discrete opacity level for a combined cell opacity
///
/// `None` for cells that are not drawn: below `MIN_CELL_OPACITY`, or too
/// faint to reach the first level.
pub fn opacity_bucket(opacity: f64) -> Option<u8> {
    if opacity.is_nan() || opacity < MIN_CELL_OPACITY {
        return None;
    }
    let levels = f64::from(OPACITY_BUCKETS);
    let bucket = (opacity * levels).floor().clamp(0.0, levels) as u8;
    (bucket > 0).then_some(bucket)
}

// Linear fade from `peak` at `start` down to zero at `end`
const fn fade(position: f64, start: f64, end: f64, peak: f64) -> f64 {
    (position - end) * peak / (start - end)
}

/// Rasterize the shadow for one frame
///
/// Pure over its inputs: identical arguments always produce an identical
/// frame. An empty field or profile, or an anchor outside the field,
/// yields an empty frame.
pub fn render_frame(
    anchor: Point,
    signals: &SmoothedSignals,
    field: &HeightField,
    profile: &ShapeProfile,
    params: &RenderParams,
    shape: CursorShape,
) -> Frame {
    if field.is_empty() || profile.is_empty() {
        return Frame::empty();
    }

    let geometry = ShadowGeometry::new(shape, signals);
    let [base_x, base_y] = anchor.cell();
    let Some(base_height) = field.get(base_x, base_y) else {
        return Frame::empty();
    };
    let base_height = f64::from(base_height);

    let transparency = params.transparency();
    let angle_opacity = if geometry.fixed {
        transparency
    } else {
        tilt_opacity(geometry.angle, transparency)
    };
    let length_fade_start = geometry.length * LENGTH_FADE_START;
    let reach = (field.width() + field.height()) as f64;
    let move_scale = params.move_scale();

    let (sin, cos) = geometry.theta.sin_cos();
    let (shift_sin, shift_cos) = (-geometry.theta - DISPLACEMENT_DIRECTION_OFFSET).sin_cos();

    let mut buckets: [Vec<CellRect>; OPACITY_BUCKETS as usize + 1] =
        std::array::from_fn(|_| Vec::new());

    let columns = (0..)
        .map(|i| f64::from(i) * SHADOW_CELL_SIZE)
        .take_while(|&x| x < geometry.length);

    for x in columns {
        let opacity_x = if !geometry.fixed && x >= length_fade_start {
            fade(x, length_fade_start, geometry.length, transparency)
        } else {
            transparency
        };

        let index = (x * geometry.x_step).round() as usize;
        let Some(width) = profile.width_at(index).filter(|w| w.is_finite()) else {
            continue;
        };
        let half_width = width / 2.0;
        let width_fade_start = WIDTH_FADE_START * half_width;

        // Rows farther than `reach` from the anchor never land on the field
        let first_row = ((half_width - reach) / SHADOW_CELL_SIZE).ceil().max(0.0);
        let row_count = (2.0 * half_width.min(reach) / SHADOW_CELL_SIZE)
            .ceil()
            .max(0.0) as usize
            + 1;
        let rows = (0..row_count)
            .map(|j| (first_row + j as f64).mul_add(SHADOW_CELL_SIZE, -half_width))
            .take_while(|&y| y < half_width);

        for y in rows {
            let canvas_x = anchor.x + x.mul_add(cos, -y * sin);
            let canvas_y = anchor.y + x.mul_add(sin, y * cos);
            let Some(height) = field.get(canvas_x as i64, canvas_y as i64) else {
                continue;
            };

            let opacity_y = if !geometry.fixed && y.abs() >= width_fade_start {
                fade(y.abs(), width_fade_start, half_width, transparency)
            } else {
                transparency
            };

            let opacity = opacity_x.min(opacity_y).min(angle_opacity);
            let Some(bucket) = opacity_bucket(opacity) else {
                continue;
            };

            let shift = move_scale * (f64::from(height) - base_height);
            let cell = CellRect {
                x: shift.mul_add(shift_cos, x),
                y: shift.mul_add(shift_sin, y),
                size: SHADOW_CELL_SIZE,
            };
            if let Some(cells) = buckets.get_mut(usize::from(bucket)) {
                cells.push(cell);
            }
        }
    }

    let batches = buckets
        .into_iter()
        .enumerate()
        .filter(|(_, cells)| !cells.is_empty())
        .map(|(bucket, cells)| DrawBatch {
            bucket: bucket as u8,
            cells,
        })
        .collect();

    Frame {
        origin: anchor,
        rotation: geometry.theta,
        batches,
    }
}
