//! Command-line interface for replaying pen traces over a display image

use crate::algorithm::dynamics::DynamicsStep;
use crate::algorithm::session::{Session, SurfaceLoader};
use crate::analysis::binding::RenderParams;
use crate::analysis::calibration::LazyCalibration;
use crate::analysis::statistics::ImageStatistics;
use crate::io::configuration::{
    DELTA_PIXEL_RANGE, GIF_FRAME_DELAY_MS, GRADIENT_THRESHOLD_RANGE, HISTORY_LOG_NAME,
    SURFACE_POLL_INTERVAL, TRANSPARENCY_RANGE,
};
use crate::io::error::{Result, ShadowError, invalid_parameter};
use crate::io::image::{output_path, save_png};
use crate::io::progress::ReplayProgress;
use crate::io::trace::read_trace;
use crate::io::visualization::{FrameCapture, composite_frame};
use crate::spatial::{CursorShape, ShapeProfile};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "shadow-haptics")]
#[command(
    author,
    version,
    about = "Replay a pen trace with pseudo-haptic shadow rendering"
)]
/// Command-line arguments for trace replay
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Image the shadow is drawn over
    #[arg(value_name = "DISPLAY")]
    pub display: PathBuf,

    /// Height source aligned pixel for pixel with the display image
    #[arg(value_name = "HEIGHT_MAP")]
    pub height_map: PathBuf,

    /// Recorded pen trace (CSV: t_ms,x,y,tilt_x,tilt_y)
    #[arg(short, long)]
    pub trace: PathBuf,

    /// Session history log used for calibration (defaults to haptics_log.csv beside the display image)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Start from default parameters without reading the history log
    #[arg(long)]
    pub no_calibration: bool,

    /// Directory holding penShape.csv and cursor.csv
    #[arg(short, long, default_value = ".")]
    pub profiles: PathBuf,

    /// Cursor shape to render
    #[arg(short, long, value_enum, default_value_t = CursorShape::Pen)]
    pub shape: CursorShape,

    /// Override the calibrated shadow transparency (0-1)
    #[arg(long)]
    pub transparency: Option<f64>,

    /// Override the calibrated displacement strength (0-30)
    #[arg(long)]
    pub delta_pixel: Option<f64>,

    /// Override the calibrated cue threshold (0-100)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Fit both images to the 1920x1080 canvas before building the height field
    #[arg(short, long)]
    pub fit: bool,

    /// Also write an animated GIF with one frame per event
    #[arg(short, long)]
    pub animate: bool,

    /// Log image statistics and the bound parameters
    #[arg(long)]
    pub stats: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// History log to calibrate from, if calibration is enabled
    pub fn history_path(&self) -> Option<PathBuf> {
        if self.no_calibration {
            return None;
        }
        Some(self.history.clone().unwrap_or_else(|| {
            self.display
                .parent()
                .map_or_else(|| PathBuf::from(HISTORY_LOG_NAME), |dir| dir.join(HISTORY_LOG_NAME))
        }))
    }

    /// Reject parameter overrides outside their slider ranges
    ///
    /// # Errors
    ///
    /// Returns [`ShadowError::InvalidParameter`] naming the first bad override
    pub fn validate(&self) -> Result<()> {
        check_range("transparency", self.transparency, TRANSPARENCY_RANGE)?;
        check_range("delta-pixel", self.delta_pixel, DELTA_PIXEL_RANGE)?;
        check_range("threshold", self.threshold, GRADIENT_THRESHOLD_RANGE)
    }
}

fn check_range(parameter: &'static str, value: Option<f64>, (min, max): (f64, f64)) -> Result<()> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(invalid_parameter(
            parameter,
            &v,
            &format!("must be within [{min}, {max}]"),
        )),
        _ => Ok(()),
    }
}

/// What a replay produced
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    /// Pointer events applied
    pub events: usize,
    /// Dynamics after the last event
    pub final_step: Option<DynamicsStep>,
    /// Statistics of the loaded surface
    pub statistics: ImageStatistics,
    /// Parameters in effect during the replay
    pub params: RenderParams,
    /// Composited last frame
    pub shadow_path: PathBuf,
    /// Animation, when requested
    pub animation_path: Option<PathBuf>,
}

/// Drives one replay from the command line
pub struct ReplayProcessor {
    cli: Cli,
}

impl ReplayProcessor {
    /// Create a processor for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load everything, replay the trace and write the outputs
    ///
    /// The surface is built on a worker thread while the trace, profile and
    /// calibration are read.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A parameter override is out of range
    /// - An image, the trace or a profile cannot be read
    /// - The outputs cannot be written
    pub fn process(&self) -> Result<ReplaySummary> {
        self.cli.validate()?;
        let start_time = Instant::now();

        let pending = SurfaceLoader::spawn(
            self.cli.display.clone(),
            self.cli.height_map.clone(),
            self.cli.fit,
        )?;

        let samples = read_trace(&self.cli.trace)?;
        let profile = ShapeProfile::load(&self.cli.profiles, self.cli.shape)?;
        let calibration = self
            .cli
            .history_path()
            .map_or_else(LazyCalibration::disabled, LazyCalibration::new);

        let mut session = Session::new(profile, self.cli.shape, *calibration.get());
        session.attach(pending);
        while !session.poll()? {
            std::thread::sleep(SURFACE_POLL_INTERVAL);
        }
        self.apply_overrides(&mut session);

        let surface = session.surface().ok_or_else(|| ShadowError::SurfaceWorker {
            reason: "surface missing after handoff".to_string(),
        })?;
        let statistics = surface.statistics;
        let display = surface.display.clone();

        if self.cli.stats {
            log_statistics(&statistics, session.params());
        }

        let progress = ReplayProgress::new(
            &self.cli.trace,
            samples.len(),
            self.cli.should_show_progress(),
        );
        let mut capture = self
            .cli
            .animate
            .then(|| FrameCapture::with_capacity(samples.len()));

        let origin = Instant::now();
        let mut final_step = None;
        for sample in &samples {
            let event = sample
                .to_event(origin)
                .ok_or_else(|| ShadowError::TraceParse {
                    path: self.cli.trace.clone(),
                    line: sample.line,
                    reason: "timestamp overflows the clock".to_string(),
                })?;
            final_step = session.on_pointer_moved(event);
            if let Some(ref mut capture) = capture {
                capture.record(session.render());
            }
            progress.event();
        }

        progress.status("compositing");
        let shadow_path = output_path(&self.cli.display, "png");
        save_png(&composite_frame(&display, &session.render()), &shadow_path)?;

        let animation_path = match capture {
            Some(capture) => {
                progress.status("encoding animation");
                let path = output_path(&self.cli.display, "gif");
                capture.export_gif(&display, &path, GIF_FRAME_DELAY_MS)?;
                Some(path)
            }
            None => None,
        };
        progress.finish();

        log::info!(
            "Replayed {} events from {} in {:.2?}",
            samples.len(),
            self.cli.trace.display(),
            start_time.elapsed()
        );

        Ok(ReplaySummary {
            events: samples.len(),
            final_step,
            statistics,
            params: *session.params(),
            shadow_path,
            animation_path,
        })
    }

    fn apply_overrides(&self, session: &mut Session) {
        if let Some(value) = self.cli.transparency {
            session.set_transparency(value);
        }
        if let Some(value) = self.cli.delta_pixel {
            session.set_delta_pixel(value);
        }
        if let Some(value) = self.cli.threshold {
            session.set_gradient_threshold(value);
        }
    }
}

fn log_statistics(statistics: &ImageStatistics, params: &RenderParams) {
    log::info!(
        "Height std dev {:.2}, roughness index {:.3}",
        statistics.height_std_dev,
        statistics.roughness_index
    );
    log::info!(
        "Brightness mean {:.2}, median {:.2}, index {:.3}",
        statistics.brightness_mean,
        statistics.brightness_median,
        statistics.brightness_index
    );
    log::info!(
        "Transparency {:.2}, delta pixel {:.2}, threshold {:.2}",
        params.transparency(),
        params.delta_pixel(),
        params.gradient_threshold()
    );
}
