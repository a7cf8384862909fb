//! Tests for history-driven model fitting and lazy calibration

#[cfg(test)]
mod tests {
    use shadow_haptics::analysis::calibration::{Calibration, LazyCalibration};
    use shadow_haptics::io::history::HistoryRecord;
    use std::fs;
    use tempfile::TempDir;

    fn record(roughness: f64, brightness: f64) -> HistoryRecord {
        HistoryRecord {
            transparency: brightness * brightness,
            delta_pixel: 2.0 * roughness + 1.0,
            gradient_threshold: 5.0,
            roughness_index: roughness,
            brightness_index: brightness,
        }
    }

    // Tests fewer than three rows leave every model unset
    // Verified by lowering the minimum row count to one
    #[test]
    fn test_too_few_rows_is_uncalibrated() {
        let records = [record(0.1, 0.2), record(0.3, 0.4)];
        assert_eq!(Calibration::fit(&records), Calibration::uncalibrated());
    }

    // Tests each model recovers its target relationship
    // Verified by fitting transparency against roughness
    #[test]
    fn test_fit_recovers_targets() {
        let records = [
            record(0.1, 0.2),
            record(0.3, 0.5),
            record(0.6, 0.7),
            record(0.8, 0.9),
        ];
        let calibration = Calibration::fit(&records);

        let delta = calibration.delta_pixel.expect("delta pixel model");
        let threshold = calibration.gradient_threshold.expect("threshold model");
        let transparency = calibration.transparency.expect("transparency model");

        assert!((delta.predict(0.5) - 2.0).abs() < 1e-6);
        assert!((threshold.predict(0.4) - 5.0).abs() < 1e-6);
        assert!((transparency.predict(0.6) - 0.36).abs() < 1e-6);
    }

    // Tests a degenerate index only disables the models that use it
    // Verified by discarding all models on any singular fit
    #[test]
    fn test_singular_target_stays_unset() {
        let records = [record(0.4, 0.2), record(0.4, 0.5), record(0.4, 0.9)];
        let calibration = Calibration::fit(&records);

        assert!(calibration.delta_pixel.is_none());
        assert!(calibration.gradient_threshold.is_none());
        assert!(calibration.transparency.is_some());
    }

    // Tests lazy calibration reads the log once on first use
    // Verified by re-reading the log on every call
    #[test]
    fn test_lazy_calibration_reads_history() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("haptics_log.csv");
        fs::write(
            &path,
            "Date,Image1,Image2,Transparency,DeltaPixel,CDThreshold,RoughnessIndex,BrightnessIndex\n\
             d,a,b,0.04,1.2,5,0.1,0.2\n\
             d,a,b,0.25,1.6,5,0.3,0.5\n\
             d,a,b,0.81,2.6,5,0.8,0.9\n",
        )
        .expect("Failed to write history");

        let lazy = LazyCalibration::new(path.clone());
        assert!(!lazy.is_initialized());
        let first = *lazy.get();
        assert!(lazy.is_initialized());
        assert!(first.delta_pixel.is_some());

        fs::remove_file(&path).expect("Failed to remove history");
        assert_eq!(*lazy.get(), first);
    }

    // Tests missing history and disabled calibration fall back to defaults
    // Verified by treating a missing log as an error
    #[test]
    fn test_missing_or_disabled_is_uncalibrated() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let lazy = LazyCalibration::new(dir.path().join("absent.csv"));
        assert_eq!(*lazy.get(), Calibration::uncalibrated());

        let disabled = LazyCalibration::disabled();
        assert_eq!(*disabled.get(), Calibration::uncalibrated());
    }
}
