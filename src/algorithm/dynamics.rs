//! Pseudo-haptic shadow anchor state machine
//!
//! The shadow normally sits exactly under the pen. When the pen is about to
//! climb a step in the height field the shadow briefly drags backwards
//! (resistance); when it is about to drop it briefly races ahead
//! (acceleration). Each cue lasts 0.4 s:
//!
//! - 0.0–0.3 s: the anchor moves by the raw pen delta times the cue ratio
//! - 0.3–0.4 s: the anchor eases back toward the pen
//! - after 0.4 s: the anchor snaps to the pen and the machine is idle again
//!
//! New cues can only start from idle.

use crate::io::configuration::{
    ACCELERATE_RATIO, CUE_DISPLACE_SECONDS, CUE_TOTAL_SECONDS, LOOK_AHEAD_DISTANCE,
    NOMINAL_FRAME_INTERVAL, RESISTANCE_RATIO,
};
use crate::spatial::{HeightField, Point};
use std::time::Instant;

/// Animation state of the shadow anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowState {
    /// Anchor follows the pen exactly
    #[default]
    Idle,
    /// Pen is climbing; the anchor lags behind
    Resistance {
        /// When the cue began
        started: Instant,
    },
    /// Pen is descending; the anchor overshoots
    Accelerate {
        /// When the cue began
        started: Instant,
    },
}

impl ShadowState {
    /// Whether no cue is running
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Start time of the running cue
    pub const fn started(&self) -> Option<Instant> {
        match self {
            Self::Idle => None,
            Self::Resistance { started } | Self::Accelerate { started } => Some(*started),
        }
    }

    /// Multiplier applied to the pen delta during the displacement phase
    pub const fn displacement_ratio(&self) -> Option<f64> {
        match self {
            Self::Idle => None,
            Self::Resistance { .. } => Some(RESISTANCE_RATIO),
            Self::Accelerate { .. } => Some(ACCELERATE_RATIO),
        }
    }
}

/// Outcome of one pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicsStep {
    /// State after the event
    pub state: ShadowState,
    /// Where the shadow is drawn
    pub anchor: Point,
    /// Height difference looked ahead along the movement direction
    pub gradient: f64,
}

/// Owns the shadow anchor and advances it once per pointer event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShadowDynamics {
    state: ShadowState,
    anchor: Point,
    previous: Option<Point>,
}

impl ShadowDynamics {
    /// Idle machine with no recorded position
    pub const fn new() -> Self {
        Self {
            state: ShadowState::Idle,
            anchor: Point::new(0.0, 0.0),
            previous: None,
        }
    }

    /// Current animation state
    pub const fn state(&self) -> ShadowState {
        self.state
    }

    /// Current shadow anchor
    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    /// Raw position of the previous event, if any
    pub const fn previous_position(&self) -> Option<Point> {
        self.previous
    }

    /// Raw movement since the previous event; zero for the first event
    pub fn movement_delta(&self, raw: Point) -> Point {
        raw - self.previous.unwrap_or(raw)
    }

    /// Advance the machine for a pen sample at `raw` observed at `now`
    ///
    /// The first event only records the position and places the anchor on it.
    pub fn advance(
        &mut self,
        raw: Point,
        now: Instant,
        field: &HeightField,
        threshold: f64,
    ) -> DynamicsStep {
        let delta = self.movement_delta(raw);
        let gradient = depth_gradient(field, raw, delta);

        if self.previous.is_none() {
            self.anchor = raw;
            self.previous = Some(raw);
            return self.step(gradient);
        }

        if self.state.is_idle() {
            if gradient > threshold {
                self.state = ShadowState::Resistance { started: now };
            } else if gradient < -threshold {
                self.state = ShadowState::Accelerate { started: now };
            }
        }

        match (self.state.started(), self.state.displacement_ratio()) {
            (Some(started), Some(ratio)) => {
                let elapsed = now.saturating_duration_since(started).as_secs_f64();
                if elapsed < CUE_DISPLACE_SECONDS {
                    self.anchor += delta * ratio;
                } else if elapsed < CUE_TOTAL_SECONDS {
                    self.ease_toward(raw, CUE_TOTAL_SECONDS - elapsed);
                } else {
                    self.state = ShadowState::Idle;
                    self.anchor = raw;
                }
            }
            _ => self.anchor = raw,
        }

        self.previous = Some(raw);
        self.step(gradient)
    }

    // Close one frame's share of the gap so the anchor lands on the pen
    // when the cue ends
    fn ease_toward(&mut self, target: Point, remaining_seconds: f64) {
        let step = NOMINAL_FRAME_INTERVAL / remaining_seconds;
        if step >= 1.0 {
            self.anchor = target;
        } else {
            self.anchor += (target - self.anchor) * step;
        }
    }

    const fn step(&self, gradient: f64) -> DynamicsStep {
        DynamicsStep {
            state: self.state,
            anchor: self.anchor,
            gradient,
        }
    }
}

/// Height ahead of the pen minus height under it
///
/// Samples `LOOK_AHEAD_DISTANCE` along the normalized movement direction.
/// Zero when the pen did not move or either sample is outside the field.
pub fn depth_gradient(field: &HeightField, raw: Point, delta: Point) -> f64 {
    let distance = delta.length();
    if distance <= 0.0 {
        return 0.0;
    }

    let ahead = raw + delta * (LOOK_AHEAD_DISTANCE / distance);
    let [x, y] = raw.cell();
    let [ahead_x, ahead_y] = ahead.cell();

    match (field.get(x, y), field.get(ahead_x, ahead_y)) {
        (Some(here), Some(next)) => f64::from(next) - f64::from(here),
        _ => 0.0,
    }
}
