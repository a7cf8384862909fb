//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Canvas points and tilt vectors
//! - The normalized height field sampled by dynamics and rendering
//! - Pen silhouette width profiles

/// Canvas points and stylus tilt vectors
pub mod geometry;
/// Normalized height grid built from a height source image
pub mod height_field;
/// Silhouette width profiles and cursor shape selection
pub mod profile;

pub use geometry::{Point, Tilt};
pub use height_field::HeightField;
pub use profile::{CursorShape, ShapeProfile};
