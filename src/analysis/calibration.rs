//! Regression models mapping image statistics to render parameters
//!
//! Past sessions that an operator marked as feeling right are logged with
//! the parameters in use and the image's statistics. Fitting a quadratic
//! per parameter lets new images start close to those choices.

use crate::io::configuration::MIN_CALIBRATION_ROWS;
use crate::io::history::{HistoryRecord, read_history};
use crate::math::regression::QuadraticModel;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Fitted models; a `None` leaves that parameter at its default
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Calibration {
    /// Delta pixel as a function of roughness index
    pub delta_pixel: Option<QuadraticModel>,
    /// Gradient threshold as a function of roughness index
    pub gradient_threshold: Option<QuadraticModel>,
    /// Transparency as a function of brightness index
    pub transparency: Option<QuadraticModel>,
}

impl Calibration {
    /// Calibration with no fitted models
    pub const fn uncalibrated() -> Self {
        Self {
            delta_pixel: None,
            gradient_threshold: None,
            transparency: None,
        }
    }

    /// Fit all three models from history rows
    ///
    /// Targets with fewer than `MIN_CALIBRATION_ROWS` rows, or whose normal
    /// equations are singular, stay unset.
    pub fn fit(records: &[HistoryRecord]) -> Self {
        if records.len() < MIN_CALIBRATION_ROWS {
            log::info!(
                "Calibration skipped: {} history rows, need {MIN_CALIBRATION_ROWS}",
                records.len()
            );
            return Self::uncalibrated();
        }

        let roughness: Vec<f64> = records.iter().map(|r| r.roughness_index).collect();
        let brightness: Vec<f64> = records.iter().map(|r| r.brightness_index).collect();
        let column = |f: fn(&HistoryRecord) -> f64| records.iter().map(f).collect::<Vec<f64>>();

        let calibration = Self {
            delta_pixel: fit_target("delta pixel", &roughness, &column(|r| r.delta_pixel)),
            gradient_threshold: fit_target(
                "gradient threshold",
                &roughness,
                &column(|r| r.gradient_threshold),
            ),
            transparency: fit_target("transparency", &brightness, &column(|r| r.transparency)),
        };

        log::info!(
            "Calibrated from {} rows (delta pixel: {}, threshold: {}, transparency: {})",
            records.len(),
            calibration.delta_pixel.is_some(),
            calibration.gradient_threshold.is_some(),
            calibration.transparency.is_some()
        );

        calibration
    }
}

fn fit_target(name: &str, xs: &[f64], ys: &[f64]) -> Option<QuadraticModel> {
    match QuadraticModel::fit(xs, ys) {
        Ok(model) => Some(model),
        Err(e) => {
            log::warn!("Leaving {name} uncalibrated: {e}");
            None
        }
    }
}

/// Process-wide calibration fitted the first time it is requested
///
/// The history log is read at most once; the resulting models are immutable
/// and can be shared between sessions and threads.
#[derive(Debug)]
pub struct LazyCalibration {
    history_path: Option<PathBuf>,
    models: OnceLock<Calibration>,
}

impl LazyCalibration {
    /// Calibrate lazily from the history log at `history_path`
    pub const fn new(history_path: PathBuf) -> Self {
        Self {
            history_path: Some(history_path),
            models: OnceLock::new(),
        }
    }

    /// Never calibrate; every parameter keeps its default
    pub const fn disabled() -> Self {
        Self {
            history_path: None,
            models: OnceLock::new(),
        }
    }

    /// Fitted models, reading the history log on first call
    ///
    /// An unreadable log is reported and treated as empty.
    pub fn get(&self) -> &Calibration {
        self.models.get_or_init(|| {
            let Some(path) = &self.history_path else {
                return Calibration::uncalibrated();
            };
            match read_history(path) {
                Ok(records) => Calibration::fit(&records),
                Err(e) => {
                    log::warn!("Ignoring history log: {e}");
                    Calibration::uncalibrated()
                }
            }
        })
    }

    /// Whether the models have been fitted yet
    pub fn is_initialized(&self) -> bool {
        self.models.get().is_some()
    }
}
