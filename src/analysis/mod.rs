//! Image analysis and parameter calibration

/// Applying calibrated predictions to session render parameters
pub mod binding;
/// Regression models fitted from the session history log
pub mod calibration;
/// Roughness and brightness indices of a loaded image pair
pub mod statistics;
