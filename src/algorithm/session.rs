//! Per-session context tying the surface, signals, dynamics and renderer together
//!
//! A [`Session`] owns everything that pointer events mutate, so independent
//! sessions never share state. Surfaces are built off-thread by
//! [`SurfaceLoader`] and handed over through a channel; until the handoff
//! completes the session ignores pointer input and renders nothing.

use crate::algorithm::dynamics::{DynamicsStep, ShadowDynamics};
use crate::algorithm::renderer::{Frame, render_frame};
use crate::algorithm::smoothing::{PenSignalSmoother, SmoothedSignals};
use crate::analysis::binding::{ParameterBinder, RenderParams};
use crate::analysis::calibration::Calibration;
use crate::analysis::statistics::ImageStatistics;
use crate::io::configuration::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::io::error::{Result, ShadowError};
use crate::io::image::{check_dimensions, fit_display_to_canvas, load_rgb, stretch_to_canvas};
use crate::spatial::{CursorShape, HeightField, Point, ShapeProfile, Tilt};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread::JoinHandle;
use std::time::Instant;

/// One pointer-movement callback from the stylus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Raw canvas position
    pub position: Point,
    /// Tablet tilt
    pub tilt: Tilt,
    /// When the event was observed
    pub at: Instant,
}

/// Display image with its height field and statistics, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSurface {
    /// Image the shadow is drawn over
    pub display: RgbImage,
    /// Normalized heights aligned with `display`
    pub field: HeightField,
    /// Statistics used to bind the session parameters
    pub statistics: ImageStatistics,
}

impl LoadedSurface {
    /// Build the field and statistics for an aligned image pair
    ///
    /// # Errors
    ///
    /// Returns an error if the two images differ in size
    pub fn from_images(display: RgbImage, height_source: &RgbImage) -> Result<Self> {
        check_dimensions(&display, height_source)?;

        let field = HeightField::from_rgb(height_source);
        if let Some(warning) = field.degeneracy() {
            log::warn!("Height field is degenerate: {warning}");
        }
        let statistics = ImageStatistics::compute(&display, &field, f64::from(CANVAS_HEIGHT));

        Ok(Self {
            display,
            field,
            statistics,
        })
    }

    /// Decode both images and build the surface
    ///
    /// With `fit`, the display is aspect-filled onto the canvas. A height
    /// source of the same size as the unfitted display gets the identical
    /// crop; any other size is treated as a map of the already fitted
    /// canvas and stretched onto it.
    ///
    /// # Errors
    ///
    /// Returns an error if either image cannot be decoded or, without
    /// `fit`, if their sizes differ
    pub fn load(display: &Path, height_source: &Path, fit: bool) -> Result<Self> {
        let display_img = load_rgb(display)?;
        let height_img = load_rgb(height_source)?;

        if !fit {
            return Self::from_images(display_img, &height_img);
        }

        let fitted_height = if height_img.dimensions() == display_img.dimensions() {
            fit_display_to_canvas(&height_img, CANVAS_WIDTH, CANVAS_HEIGHT)
        } else {
            stretch_to_canvas(&height_img, CANVAS_WIDTH, CANVAS_HEIGHT)
        };
        let fitted_display = fit_display_to_canvas(&display_img, CANVAS_WIDTH, CANVAS_HEIGHT);
        Self::from_images(fitted_display, &fitted_height)
    }
}

/// Builds surfaces on a worker thread
#[derive(Debug, Clone, Copy)]
pub struct SurfaceLoader;

impl SurfaceLoader {
    /// Start loading `display` and `height` in the background
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be started
    pub fn spawn(display: PathBuf, height: PathBuf, fit: bool) -> Result<PendingSurface> {
        let (sender, receiver) = mpsc::channel();
        let worker = std::thread::Builder::new()
            .name("surface-loader".to_string())
            .spawn(move || {
                let started = Instant::now();
                let result = LoadedSurface::load(&display, &height, fit);
                if result.is_ok() {
                    log::debug!(
                        "Surface for {} built in {:.1?}",
                        display.display(),
                        started.elapsed()
                    );
                }
                // Receiver may already be gone if the session was dropped
                let _ = sender.send(result);
            })
            .map_err(|e| ShadowError::SurfaceWorker {
                reason: format!("could not start worker thread: {e}"),
            })?;

        Ok(PendingSurface {
            receiver,
            worker: Some(worker),
        })
    }
}

/// Receiving end of a background surface load
#[derive(Debug)]
pub struct PendingSurface {
    receiver: mpsc::Receiver<Result<LoadedSurface>>,
    worker: Option<JoinHandle<()>>,
}

impl PendingSurface {
    /// Take the result if the worker has finished, without blocking
    ///
    /// Returns `None` while the load is still running.
    pub fn try_take(&mut self) -> Option<Result<LoadedSurface>> {
        match self.receiver.try_recv() {
            Ok(result) => {
                self.join_worker();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join_worker();
                Some(Err(worker_lost(TryRecvError::Disconnected)))
            }
        }
    }

    /// Block until the worker delivers its result
    ///
    /// # Errors
    ///
    /// Returns the load error, or [`ShadowError::SurfaceWorker`] if the
    /// worker exited without sending anything
    pub fn wait(mut self) -> Result<LoadedSurface> {
        let result = self.receiver.recv().map_err(worker_lost);
        self.join_worker();
        result?
    }

    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Surface loader thread panicked");
            }
        }
    }
}

fn worker_lost(cause: impl std::fmt::Display) -> ShadowError {
    ShadowError::SurfaceWorker {
        reason: format!("worker exited without delivering a surface ({cause})"),
    }
}

/// Surface slot of a session
#[derive(Debug, Default)]
pub enum SurfaceState {
    /// Nothing attached
    #[default]
    Absent,
    /// Load in progress
    Pending(PendingSurface),
    /// Surface handed over and parameters bound
    Ready(Box<LoadedSurface>),
}

impl SurfaceState {
    /// Whether a surface is available for rendering
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Interactive state of one drawing session
#[derive(Debug)]
pub struct Session {
    surface: SurfaceState,
    profile: ShapeProfile,
    shape: CursorShape,
    calibration: Calibration,
    params: RenderParams,
    smoother: PenSignalSmoother,
    dynamics: ShadowDynamics,
}

impl Session {
    /// Session with no surface attached and default parameters
    pub fn new(profile: ShapeProfile, shape: CursorShape, calibration: Calibration) -> Self {
        Self {
            surface: SurfaceState::Absent,
            profile,
            shape,
            calibration,
            params: RenderParams::default(),
            smoother: PenSignalSmoother::default(),
            dynamics: ShadowDynamics::new(),
        }
    }

    /// Start waiting on a background load, replacing any current surface
    pub fn attach(&mut self, pending: PendingSurface) {
        self.dynamics = ShadowDynamics::new();
        self.surface = SurfaceState::Pending(pending);
    }

    /// Install an already built surface and bind parameters from it
    pub fn attach_ready(&mut self, surface: LoadedSurface) {
        self.dynamics = ShadowDynamics::new();
        self.install(surface);
    }

    /// Complete a pending handoff if the worker has finished
    ///
    /// Returns whether a surface is ready.
    ///
    /// # Errors
    ///
    /// Returns the load error once; the slot is then left empty
    pub fn poll(&mut self) -> Result<bool> {
        let SurfaceState::Pending(pending) = &mut self.surface else {
            return Ok(self.surface.is_ready());
        };

        match pending.try_take() {
            None => Ok(false),
            Some(Ok(surface)) => {
                self.install(surface);
                Ok(true)
            }
            Some(Err(e)) => {
                self.surface = SurfaceState::Absent;
                Err(e)
            }
        }
    }

    fn install(&mut self, surface: LoadedSurface) {
        ParameterBinder::new(&self.calibration).bind(&surface.statistics, &mut self.params);
        log::info!(
            "Surface ready: {}x{}, roughness {:.3}, brightness {:.3}",
            surface.display.width(),
            surface.display.height(),
            surface.statistics.roughness_index,
            surface.statistics.brightness_index
        );
        self.surface = SurfaceState::Ready(Box::new(surface));
    }

    /// Whether a surface is ready
    pub const fn is_ready(&self) -> bool {
        self.surface.is_ready()
    }

    /// The ready surface, if any
    pub fn surface(&self) -> Option<&LoadedSurface> {
        match &self.surface {
            SurfaceState::Ready(surface) => Some(&**surface),
            _ => None,
        }
    }

    /// Apply one pointer event; ignored until a surface is ready
    ///
    /// Events must be delivered in arrival order.
    pub fn on_pointer_moved(&mut self, event: PointerEvent) -> Option<DynamicsStep> {
        let SurfaceState::Ready(surface) = &self.surface else {
            return None;
        };

        let delta = self.dynamics.movement_delta(event.position);
        self.smoother.update(delta, event.tilt);
        Some(self.dynamics.advance(
            event.position,
            event.at,
            &surface.field,
            self.params.gradient_threshold(),
        ))
    }

    /// Draw commands for the current state
    ///
    /// Empty until a surface is ready and the first pointer event arrived.
    pub fn render(&self) -> Frame {
        match &self.surface {
            SurfaceState::Ready(surface) if self.dynamics.previous_position().is_some() => {
                render_frame(
                    self.dynamics.anchor(),
                    &self.smoother.signals(),
                    &surface.field,
                    &self.profile,
                    &self.params,
                    self.shape,
                )
            }
            _ => Frame::empty(),
        }
    }

    /// Switch cursor shape together with its silhouette profile
    pub fn set_cursor_shape(&mut self, shape: CursorShape, profile: ShapeProfile) {
        self.shape = shape;
        self.profile = profile;
    }

    /// Selected cursor shape
    pub const fn cursor_shape(&self) -> CursorShape {
        self.shape
    }

    /// Silhouette profile in use
    pub const fn profile(&self) -> &ShapeProfile {
        &self.profile
    }

    /// Current render parameters
    pub const fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Override the shadow transparency
    pub fn set_transparency(&mut self, value: f64) {
        self.params.set_transparency(value);
    }

    /// Override the displacement strength
    pub fn set_delta_pixel(&mut self, value: f64) {
        self.params.set_delta_pixel(value);
    }

    /// Override the cue trigger threshold
    pub fn set_gradient_threshold(&mut self, value: f64) {
        self.params.set_gradient_threshold(value);
    }

    /// Calibration used when binding parameters
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Latest smoothed pen signals
    pub const fn signals(&self) -> SmoothedSignals {
        self.smoother.signals()
    }

    /// Shadow anchor state machine
    pub const fn dynamics(&self) -> &ShadowDynamics {
        &self.dynamics
    }
}
