//! Input/output: files, terminal and configuration

/// Command-line arguments and the trace replay driver
pub mod cli;
/// Tuned constants and defaults
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Session history log reader
pub mod history;
/// Raster loading, canvas fitting and PNG export
pub mod image;
/// Replay progress display
pub mod progress;
/// Recorded pen trace parsing
pub mod trace;
/// Shadow compositing and GIF export
pub mod visualization;
