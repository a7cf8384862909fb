//! Tests for render parameter clamping and calibrated binding

#[cfg(test)]
mod tests {
    use shadow_haptics::analysis::binding::{ParameterBinder, RenderParams};
    use shadow_haptics::analysis::calibration::Calibration;
    use shadow_haptics::analysis::statistics::ImageStatistics;
    use shadow_haptics::math::regression::QuadraticModel;

    fn statistics(roughness: f64, brightness: f64) -> ImageStatistics {
        ImageStatistics {
            roughness_index: roughness,
            brightness_index: brightness,
            ..ImageStatistics::default()
        }
    }

    // Tests defaults match the uncalibrated session values
    // Verified by swapping the default delta pixel and threshold
    #[test]
    fn test_defaults() {
        let params = RenderParams::default();
        assert!((params.transparency() - 0.8).abs() < f64::EPSILON);
        assert!((params.delta_pixel() - 5.0).abs() < f64::EPSILON);
        assert!((params.gradient_threshold() - 10.0).abs() < f64::EPSILON);
    }

    // Tests displacement scale is delta pixel squared over 255
    // Verified by dropping the square
    #[test]
    fn test_move_scale() {
        let params = RenderParams::new(0.5, 15.0, 20.0);
        assert!((params.move_scale() - 225.0 / 255.0).abs() < 1e-12);
    }

    // Tests setters clamp to slider ranges and map NaN to the minimum
    // Verified by clamping only the upper bound
    #[test]
    fn test_setters_clamp() {
        let mut params = RenderParams::new(-0.5, 80.0, 150.0);
        assert!(params.transparency().abs() < f64::EPSILON);
        assert!((params.delta_pixel() - 30.0).abs() < f64::EPSILON);
        assert!((params.gradient_threshold() - 100.0).abs() < f64::EPSILON);

        params.set_delta_pixel(f64::NAN);
        assert!(params.delta_pixel().abs() < f64::EPSILON);
    }

    // Tests each model drives its own parameter from the right index
    // Verified by feeding brightness to the delta pixel model
    #[test]
    fn test_bind_uses_matching_index() {
        let calibration = Calibration {
            delta_pixel: Some(QuadraticModel::new(0.0, 10.0, 0.0)),
            gradient_threshold: Some(QuadraticModel::new(0.0, 0.0, 42.0)),
            transparency: Some(QuadraticModel::new(0.0, 1.0, 0.0)),
        };
        let mut params = RenderParams::default();

        ParameterBinder::new(&calibration).bind(&statistics(0.5, 0.25), &mut params);

        assert!((params.delta_pixel() - 5.0).abs() < 1e-12);
        assert!((params.gradient_threshold() - 42.0).abs() < 1e-12);
        assert!((params.transparency() - 0.25).abs() < 1e-12);
    }

    // Tests predictions are clamped and missing models leave defaults
    // Verified by writing raw predictions without clamping
    #[test]
    fn test_bind_clamps_and_skips_missing() {
        let calibration = Calibration {
            delta_pixel: Some(QuadraticModel::new(0.0, 0.0, 99.0)),
            gradient_threshold: None,
            transparency: None,
        };
        let mut params = RenderParams::default();

        ParameterBinder::new(&calibration).bind(&statistics(0.3, 0.9), &mut params);

        assert!((params.delta_pixel() - 30.0).abs() < f64::EPSILON);
        assert!((params.gradient_threshold() - 10.0).abs() < f64::EPSILON);
        assert!((params.transparency() - 0.8).abs() < f64::EPSILON);
    }
}
