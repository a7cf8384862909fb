//! Reader for the session history log
//!
//! The log is a CSV appended to by the UI shell whenever the operator marks
//! a session as feeling right:
//!
//! ```text
//! Date,Image1,Image2,Transparency,DeltaPixel,CDThreshold,RoughnessIndex,BrightnessIndex
//! ```
//!
//! Only the five numeric columns are read. Rows with missing or malformed
//! numbers are skipped.

use crate::io::error::{Result, file_system_error};
use std::io::ErrorKind;
use std::path::Path;

/// Column positions in the history log
const TRANSPARENCY_COLUMN: usize = 3;
const DELTA_PIXEL_COLUMN: usize = 4;
const THRESHOLD_COLUMN: usize = 5;
const ROUGHNESS_COLUMN: usize = 6;
const BRIGHTNESS_COLUMN: usize = 7;

/// One logged session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRecord {
    /// Shadow transparency in use
    pub transparency: f64,
    /// Displacement strength in use
    pub delta_pixel: f64,
    /// Cue trigger threshold in use
    pub gradient_threshold: f64,
    /// Roughness index of the session's image
    pub roughness_index: f64,
    /// Brightness index of the session's image
    pub brightness_index: f64,
}

impl HistoryRecord {
    /// Parse one data row, returning `None` when any numeric field is unusable
    pub fn parse_row(row: &str) -> Option<Self> {
        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        let number = |column: usize| -> Option<f64> {
            fields
                .get(column)?
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        };

        Some(Self {
            transparency: number(TRANSPARENCY_COLUMN)?,
            delta_pixel: number(DELTA_PIXEL_COLUMN)?,
            gradient_threshold: number(THRESHOLD_COLUMN)?,
            roughness_index: number(ROUGHNESS_COLUMN)?,
            brightness_index: number(BRIGHTNESS_COLUMN)?,
        })
    }
}

/// Parse log contents, skipping the header row
pub fn parse_history(contents: &str) -> Vec<HistoryRecord> {
    contents
        .lines()
        .skip(1)
        .filter_map(HistoryRecord::parse_row)
        .collect()
}

/// Read the history log at `path`; a missing file is an empty history
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read
pub fn read_history(path: &Path) -> Result<Vec<HistoryRecord>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let records = parse_history(&contents);
            log::info!(
                "Read {} history rows from {}",
                records.len(),
                path.display()
            );
            Ok(records)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("No history log at {}", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(file_system_error(path, "read history log", e)),
    }
}
