//! Pen silhouette width profiles
//!
//! A profile lists the full silhouette width at each distance along the
//! pen's forward axis. Profiles are stored as two-column CSV files named
//! after the cursor shape; a linear taper stands in when none exists.

use crate::io::configuration::{TAPER_BASE_WIDTH, TAPER_LENGTH, TAPER_SLOPE};
use crate::io::error::{Result, file_system_error};
use std::path::Path;

/// Which silhouette the shadow is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CursorShape {
    /// Tilt-driven pen silhouette
    #[default]
    Pen,
    /// Fixed arrow-cursor silhouette that ignores tilt
    Cursor,
}

impl CursorShape {
    /// File stem of the stored profile for this shape
    pub const fn profile_name(self) -> &'static str {
        match self {
            Self::Pen => "penShape",
            Self::Cursor => "cursor",
        }
    }

    /// Whether rendering uses the fixed cursor geometry
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Cursor)
    }
}

/// Ordered silhouette widths indexed by distance along the pen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeProfile {
    widths: Vec<f64>,
}

impl ShapeProfile {
    /// Profile from explicit widths
    pub const fn new(widths: Vec<f64>) -> Self {
        Self { widths }
    }

    /// Synthetic linear taper: `max(0, 30 - 0.1 * index)` over 400 entries
    pub fn taper() -> Self {
        let widths = (0..TAPER_LENGTH)
            .map(|index| TAPER_SLOPE.mul_add(-(index as f64), TAPER_BASE_WIDTH).max(0.0))
            .collect();
        Self { widths }
    }

    /// Load `<dir>/<shape>.csv`, falling back to the taper when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the profile file exists but cannot be read
    pub fn load(dir: &Path, shape: CursorShape) -> Result<Self> {
        let path = dir.join(format!("{}.csv", shape.profile_name()));
        if !path.is_file() {
            log::info!(
                "No stored profile at {}, using linear taper",
                path.display()
            );
            return Ok(Self::taper());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| file_system_error(&path, "read shape profile", e))?;
        Ok(Self::parse(&contents))
    }

    /// Parse CSV text, skipping the header row and rows without a finite width
    pub fn parse(contents: &str) -> Self {
        let widths = contents
            .lines()
            .skip(1)
            .filter_map(|row| {
                row.split(',')
                    .nth(1)?
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|w| w.is_finite())
            })
            .collect();
        Self { widths }
    }

    /// Width at `index`, or `None` past the end of the profile
    pub fn width_at(&self, index: usize) -> Option<f64> {
        self.widths.get(index).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Whether the profile has no entries
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}
