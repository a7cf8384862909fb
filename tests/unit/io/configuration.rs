//! Tests for tuned constants and their relationships

#[cfg(test)]
mod tests {
    use shadow_haptics::io::configuration::{
        ACCELERATE_RATIO, CANVAS_HEIGHT, CANVAS_WIDTH, CUE_DISPLACE_SECONDS, CUE_TOTAL_SECONDS,
        DEFAULT_DELTA_PIXEL, DEFAULT_GRADIENT_THRESHOLD, DEFAULT_TRANSPARENCY, DELTA_PIXEL_RANGE,
        GIF_FRAME_DELAY_MS, GRADIENT_THRESHOLD_RANGE, LENGTH_FADE_START, OPACITY_BUCKETS,
        OUTPUT_SUFFIX, RESISTANCE_RATIO, SMOOTHING_FACTOR, TRANSPARENCY_RANGE,
        VIEWER_MIN_FRAME_DELAY_MS, WIDTH_FADE_START,
    };

    fn within((min, max): (f64, f64), value: f64) -> bool {
        (min..=max).contains(&value)
    }

    // Tests defaults sit inside their slider ranges
    // Verified by moving a default outside its range
    #[test]
    fn test_defaults_within_ranges() {
        assert!(within(TRANSPARENCY_RANGE, DEFAULT_TRANSPARENCY));
        assert!(within(DELTA_PIXEL_RANGE, DEFAULT_DELTA_PIXEL));
        assert!(within(GRADIENT_THRESHOLD_RANGE, DEFAULT_GRADIENT_THRESHOLD));
    }

    // Tests cue phase boundaries and ratios
    // Verified by swapping the phase boundaries
    #[test]
    fn test_cue_phases_ordered() {
        assert!((CUE_DISPLACE_SECONDS - 0.3).abs() < f64::EPSILON);
        assert!((CUE_TOTAL_SECONDS - 0.4).abs() < f64::EPSILON);
        assert!((RESISTANCE_RATIO + 0.3).abs() < f64::EPSILON);
        assert!((ACCELERATE_RATIO - 2.0).abs() < f64::EPSILON);
    }

    // Tests tuned fade and quantization constants
    // Verified by changing constant values
    #[test]
    fn test_render_constants() {
        assert!((LENGTH_FADE_START - 0.5).abs() < f64::EPSILON);
        assert!((WIDTH_FADE_START - 0.6).abs() < f64::EPSILON);
        assert_eq!(OPACITY_BUCKETS, 10);
        assert!((SMOOTHING_FACTOR - 0.9).abs() < f64::EPSILON);
    }

    // Tests canvas and output settings
    // Verified by changing constant values
    #[test]
    fn test_output_settings() {
        assert_eq!((CANVAS_WIDTH, CANVAS_HEIGHT), (1920, 1080));
        assert_eq!(OUTPUT_SUFFIX, "_shadow");
        assert_eq!(GIF_FRAME_DELAY_MS, 16);
        assert_eq!(VIEWER_MIN_FRAME_DELAY_MS, 50);
    }
}
