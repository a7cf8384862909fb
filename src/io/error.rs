//! Error types for surface loading, calibration input and frame export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all shadow pipeline operations
#[derive(Debug)]
pub enum ShadowError {
    /// Raster could not be opened or decoded
    ImageDecode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Display image and height source do not share pixel dimensions
    ///
    /// Gradient lookups index the height field with display coordinates,
    /// so both rasters must line up pixel for pixel.
    ImageDimensionMismatch {
        /// Display image dimensions (width, height)
        display: (u32, u32),
        /// Height source dimensions (width, height)
        height: (u32, u32),
    },

    /// Failed to save a composited frame to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A pen trace row could not be parsed
    TraceParse {
        /// Trace file being read
        path: PathBuf,
        /// One-based line number of the offending row
        line: usize,
        /// Description of what was wrong with the row
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An animation export was requested but no frames were recorded
    EmptyCapture,

    /// Background surface loader stopped without delivering a result
    SurfaceWorker {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for ShadowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDecode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::ImageDimensionMismatch { display, height } => {
                write!(
                    f,
                    "Height source is {}x{} but display image is {}x{}",
                    height.0, height.1, display.0, display.1
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::TraceParse { path, line, reason } => {
                write!(
                    f,
                    "Invalid pen trace row {line} in '{}': {reason}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyCapture => write!(f, "No frames captured for animation export"),
            Self::SurfaceWorker { reason } => {
                write!(f, "Surface loader failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ShadowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Recoverable degenerate input, reported but never propagated as an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateGeometry {
    /// No pixel fell inside the statistics sampling disk
    EmptySamplingDisk,
    /// Every pixel of the height source has the same mean intensity
    FlatHeightField,
}

impl fmt::Display for DegenerateGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySamplingDisk => write!(f, "sampling disk contains no pixels"),
            Self::FlatHeightField => write!(f, "height source has no intensity range"),
        }
    }
}

/// Convenience type alias for shadow pipeline results
pub type Result<T> = std::result::Result<T, ShadowError>;

impl From<std::io::Error> for ShadowError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ShadowError {
    ShadowError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Wrap an I/O failure with the path and operation that produced it
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> ShadowError {
    ShadowError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
