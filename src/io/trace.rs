//! Recorded pen traces for offline replay
//!
//! A trace is a CSV with header `t_ms,x,y,tilt_x,tilt_y`: milliseconds since
//! the first sample, canvas position, and tablet tilt.

use crate::algorithm::session::PointerEvent;
use crate::io::error::{Result, ShadowError, file_system_error};
use crate::spatial::{Point, Tilt};
use std::path::Path;
use std::time::{Duration, Instant};

/// One recorded pointer sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSample {
    /// Time since the first sample
    pub offset: Duration,
    /// Raw canvas position
    pub position: Point,
    /// Tablet tilt
    pub tilt: Tilt,
    /// One-based line number in the trace file
    pub line: usize,
}

impl TraceSample {
    /// Pointer event at `origin + offset`, or `None` if that instant is not
    /// representable
    pub fn to_event(&self, origin: Instant) -> Option<PointerEvent> {
        Some(PointerEvent {
            position: self.position,
            tilt: self.tilt,
            at: origin.checked_add(self.offset)?,
        })
    }
}

/// Parse trace contents; `path` is only used in error messages
///
/// # Errors
///
/// Returns an error if a data row has fewer than five fields, a field is not
/// a finite number, a timestamp is negative or too large for a `Duration`,
/// or timestamps go backwards
pub fn parse_trace(contents: &str, path: &Path) -> Result<Vec<TraceSample>> {
    let mut samples: Vec<TraceSample> = Vec::new();

    for (index, row) in contents.lines().enumerate().skip(1) {
        if row.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let fail = |reason: String| ShadowError::TraceParse {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let mut values = [0.0_f64; 5];
        let mut fields = row.split(',').map(str::trim);
        for value in &mut values {
            let field = fields
                .next()
                .ok_or_else(|| fail("expected 5 fields".to_string()))?;
            *value = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| fail(format!("'{field}' is not a number")))?;
        }
        let [t_ms, x, y, tilt_x, tilt_y] = values;

        if t_ms < 0.0 {
            return Err(fail(format!("negative timestamp {t_ms}")));
        }
        let offset = Duration::try_from_secs_f64(t_ms / 1000.0)
            .map_err(|e| fail(format!("timestamp {t_ms} out of range: {e}")))?;
        if samples.last().is_some_and(|prev| prev.offset > offset) {
            return Err(fail("timestamps must not decrease".to_string()));
        }

        samples.push(TraceSample {
            offset,
            position: Point::new(x, y),
            tilt: Tilt::new(tilt_x, tilt_y),
            line,
        });
    }

    Ok(samples)
}

/// Read and parse the trace at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be read or any row is invalid
pub fn read_trace(path: &Path) -> Result<Vec<TraceSample>> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read pen trace", e))?;
    parse_trace(&contents, path)
}
