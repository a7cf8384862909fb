//! Tuned constants and runtime configuration defaults

use std::f64::consts::PI;
use std::time::Duration;

// Canvas every tuned distance below assumes
/// Canvas width in pixels that uploaded images are fitted to
pub const CANVAS_WIDTH: u32 = 1920;
/// Canvas height in pixels; also the reference height for the sampling disk
pub const CANVAS_HEIGHT: u32 = 1080;

/// Diameter of the statistics sampling disk as a fraction of the reference height
pub const SAMPLING_DISK_RATIO: f64 = 0.4;
/// Largest standard deviation a 0-255 field can produce
pub const MAX_EXPECTED_STD_DEV: f64 = 255.0 / 2.0;

/// Rec. 709 luminance weights for red, green and blue
pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

// Session render parameter defaults and slider ranges
/// Shadow transparency before calibration
pub const DEFAULT_TRANSPARENCY: f64 = 0.80;
/// Displacement strength before calibration
pub const DEFAULT_DELTA_PIXEL: f64 = 5.0;
/// Gradient threshold before calibration
pub const DEFAULT_GRADIENT_THRESHOLD: f64 = 10.0;
/// Allowed transparency range
pub const TRANSPARENCY_RANGE: (f64, f64) = (0.0, 1.0);
/// Allowed delta pixel range
pub const DELTA_PIXEL_RANGE: (f64, f64) = (0.0, 30.0);
/// Allowed gradient threshold range
pub const GRADIENT_THRESHOLD_RANGE: (f64, f64) = (0.0, 100.0);

/// Minimum number of history rows before a model is fitted
pub const MIN_CALIBRATION_ROWS: usize = 3;
/// Pivots smaller than this make the normal equations singular
pub const PIVOT_EPSILON: f64 = 1e-9;

/// Weight given to each new raw pen reading
pub const SMOOTHING_FACTOR: f64 = 0.9;

// Haptic cue animation
/// Distance sampled ahead of the pointer along the movement direction
pub const LOOK_AHEAD_DISTANCE: f64 = 3.0;
/// Anchor displacement ratio while resisting
pub const RESISTANCE_RATIO: f64 = -0.3;
/// Anchor displacement ratio while accelerating
pub const ACCELERATE_RATIO: f64 = 2.0;
/// End of the displacement phase in seconds
pub const CUE_DISPLACE_SECONDS: f64 = 0.3;
/// End of the ease-back phase in seconds
pub const CUE_TOTAL_SECONDS: f64 = 0.4;
/// Nominal display frame interval used by the ease-back step
pub const NOMINAL_FRAME_INTERVAL: f64 = 1.0 / 60.0;

// Shadow silhouette rasterization
/// Edge length of one shadow cell
pub const SHADOW_CELL_SIZE: f64 = 2.0;
/// Shadow length at the shortest column stride
pub const SHADOW_BASE_LENGTH: f64 = 200.0;
/// Fixed shadow length in cursor mode
pub const CURSOR_SHADOW_LENGTH: f64 = 100.0;
/// Fixed shadow direction in cursor mode (60 degrees)
pub const CURSOR_THETA: f64 = PI / 3.0;
/// Fraction of the length where the along-length fade begins
pub const LENGTH_FADE_START: f64 = 0.5;
/// Fraction of each half-width where the across-width fade begins
pub const WIDTH_FADE_START: f64 = 0.6;
/// Tilt angle above which the shadow is fully visible
pub const TILT_FULL_OPACITY_ANGLE: f64 = PI / 9.0;
/// Offset applied to the displacement direction
pub const DISPLACEMENT_DIRECTION_OFFSET: f64 = PI / 7.0;
/// Number of discrete opacity levels
pub const OPACITY_BUCKETS: u8 = 10;
/// Cells below this opacity are not drawn
pub const MIN_CELL_OPACITY: f64 = 0.01;

// Fallback shape profile
/// Number of entries in the synthetic taper
pub const TAPER_LENGTH: usize = 400;
/// Width of the taper at index zero
pub const TAPER_BASE_WIDTH: f64 = 30.0;
/// Width lost per taper index
pub const TAPER_SLOPE: f64 = 0.1;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to composited frame filenames
pub const OUTPUT_SUFFIX: &str = "_shadow";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 16;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// History log file name looked up beside the inputs when none is given
pub const HISTORY_LOG_NAME: &str = "haptics_log.csv";
/// How often the CLI checks whether the background surface load finished
pub const SURFACE_POLL_INTERVAL: Duration = Duration::from_millis(5);
