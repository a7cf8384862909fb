//! Per-session render parameters and their calibrated initial values

use crate::analysis::calibration::Calibration;
use crate::analysis::statistics::ImageStatistics;
use crate::io::configuration::{
    DEFAULT_DELTA_PIXEL, DEFAULT_GRADIENT_THRESHOLD, DEFAULT_TRANSPARENCY, DELTA_PIXEL_RANGE,
    GRADIENT_THRESHOLD_RANGE, TRANSPARENCY_RANGE,
};

/// Render parameters of one session
///
/// Bound once from calibration when an image loads; the operator may
/// override them at any time afterwards. Setters clamp to the slider ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    transparency: f64,
    delta_pixel: f64,
    gradient_threshold: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            transparency: DEFAULT_TRANSPARENCY,
            delta_pixel: DEFAULT_DELTA_PIXEL,
            gradient_threshold: DEFAULT_GRADIENT_THRESHOLD,
        }
    }
}

impl RenderParams {
    /// Build from explicit values, clamping each to its range
    pub fn new(transparency: f64, delta_pixel: f64, gradient_threshold: f64) -> Self {
        let mut params = Self::default();
        params.set_transparency(transparency);
        params.set_delta_pixel(delta_pixel);
        params.set_gradient_threshold(gradient_threshold);
        params
    }

    /// Peak shadow opacity
    pub const fn transparency(&self) -> f64 {
        self.transparency
    }

    /// Displacement strength
    pub const fn delta_pixel(&self) -> f64 {
        self.delta_pixel
    }

    /// Height difference that triggers a haptic cue
    pub const fn gradient_threshold(&self) -> f64 {
        self.gradient_threshold
    }

    /// Pixels of displacement per unit of height difference
    pub const fn move_scale(&self) -> f64 {
        self.delta_pixel * self.delta_pixel / 255.0
    }

    /// Set the peak shadow opacity
    pub fn set_transparency(&mut self, value: f64) {
        self.transparency = clamp_to(value, TRANSPARENCY_RANGE);
    }

    /// Set the displacement strength
    pub fn set_delta_pixel(&mut self, value: f64) {
        self.delta_pixel = clamp_to(value, DELTA_PIXEL_RANGE);
    }

    /// Set the cue trigger threshold
    pub fn set_gradient_threshold(&mut self, value: f64) {
        self.gradient_threshold = clamp_to(value, GRADIENT_THRESHOLD_RANGE);
    }
}

fn clamp_to(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() { min } else { value.clamp(min, max) }
}

/// Applies calibrated predictions to a session's parameters
#[derive(Debug, Clone, Copy)]
pub struct ParameterBinder<'a> {
    calibration: &'a Calibration,
}

impl<'a> ParameterBinder<'a> {
    /// Binder backed by the given models
    pub const fn new(calibration: &'a Calibration) -> Self {
        Self { calibration }
    }

    /// Overwrite every parameter whose model exists
    ///
    /// Roughness drives delta pixel and threshold, brightness drives
    /// transparency. Parameters without a model are left untouched.
    pub fn bind(&self, statistics: &ImageStatistics, params: &mut RenderParams) {
        if let Some(model) = &self.calibration.delta_pixel {
            params.set_delta_pixel(model.predict(statistics.roughness_index));
            log::debug!(
                "Bound delta pixel {:.2} from roughness {:.3}",
                params.delta_pixel(),
                statistics.roughness_index
            );
        }

        if let Some(model) = &self.calibration.gradient_threshold {
            params.set_gradient_threshold(model.predict(statistics.roughness_index));
            log::debug!(
                "Bound gradient threshold {:.2} from roughness {:.3}",
                params.gradient_threshold(),
                statistics.roughness_index
            );
        }

        if let Some(model) = &self.calibration.transparency {
            params.set_transparency(model.predict(statistics.brightness_index));
            log::debug!(
                "Bound transparency {:.2} from brightness {:.3}",
                params.transparency(),
                statistics.brightness_index
            );
        }
    }
}
