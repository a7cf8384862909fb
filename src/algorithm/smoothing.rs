//! Exponential smoothing of stylus tilt and movement direction

use crate::io::configuration::SMOOTHING_FACTOR;
use crate::spatial::{Point, Tilt};
use std::f64::consts::{FRAC_PI_4, PI};

/// Stabilized pen signals after the latest sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SmoothedSignals {
    /// Direction the pen leans, in radians
    pub theta: f64,
    /// Magnitude of the lean
    pub angle: f64,
    /// Direction of travel, in radians
    pub movement_angle: f64,
}

/// Stateful exponential filter over raw pen readings
///
/// Each reading pulls the stable value `k` of the way toward it, so with the
/// default `k = 0.9` the output tracks the pen closely while damping
/// single-sample jitter.
#[derive(Debug, Clone, PartialEq)]
pub struct PenSignalSmoother {
    stable: SmoothedSignals,
    raw_movement_angle: f64,
    factor: f64,
}

impl Default for PenSignalSmoother {
    fn default() -> Self {
        Self::new(SMOOTHING_FACTOR)
    }
}

impl PenSignalSmoother {
    /// Smoother with weight `factor` on each new reading
    pub const fn new(factor: f64) -> Self {
        Self {
            stable: SmoothedSignals {
                theta: 0.0,
                angle: 0.0,
                movement_angle: 0.0,
            },
            raw_movement_angle: 0.0,
            factor,
        }
    }

    /// Current stabilized signals
    pub const fn signals(&self) -> SmoothedSignals {
        self.stable
    }

    /// Fold in one sample: the position change since the previous event and the tilt
    ///
    /// A zero `delta` keeps the last raw movement direction so a resting pen
    /// does not snap its direction to an arbitrary angle.
    pub fn update(&mut self, delta: Point, tilt: Tilt) -> SmoothedSignals {
        let raw_theta = (-tilt.y).atan2(tilt.x) + FRAC_PI_4;
        let raw_angle = tilt.y.hypot(tilt.x);
        if !delta.is_zero() {
            self.raw_movement_angle = delta.y.atan2(delta.x) + FRAC_PI_4 + PI;
        }

        let k = self.factor;
        let blend = |stable: f64, raw: f64| stable.mul_add(1.0 - k, raw * k);

        self.stable = SmoothedSignals {
            theta: blend(self.stable.theta, raw_theta),
            angle: blend(self.stable.angle, raw_angle),
            movement_angle: blend(self.stable.movement_angle, self.raw_movement_angle),
        };
        self.stable
    }
}
