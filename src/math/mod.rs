//! Mathematical utilities for calibration

/// Quadratic least-squares fitting used to calibrate render parameters
pub mod regression;
