//! Pseudo-haptic shadow rendering for stylus input over images
//!
//! A height field derived from a companion image drives a procedural pen
//! shadow. When the pen is about to climb or drop, the shadow briefly lags
//! or races ahead, giving a visual impression of resistance. Image
//! statistics and a quadratic calibration from past sessions pick the
//! initial render parameters for each new image.

#![forbid(unsafe_code)]

/// Shadow dynamics, rendering, signal smoothing and the session context
pub mod algorithm;
/// Image statistics, calibration and parameter binding
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Regression used by calibration
pub mod math;
/// Points, height fields and silhouette profiles
pub mod spatial;

pub use io::error::{Result, ShadowError};
