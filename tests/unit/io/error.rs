//! Tests for error formatting and source chaining

#[cfg(test)]
mod tests {
    use shadow_haptics::ShadowError;
    use shadow_haptics::io::error::{DegenerateGeometry, file_system_error, invalid_parameter};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests dimension mismatch names both sizes
    // Verified by swapping the display and height fields in the message
    #[test]
    fn test_dimension_mismatch_message() {
        let err = ShadowError::ImageDimensionMismatch {
            display: (640, 480),
            height: (320, 240),
        };
        assert_eq!(
            err.to_string(),
            "Height source is 320x240 but display image is 640x480"
        );
        assert!(err.source().is_none());
    }

    // Tests file system errors keep their cause
    // Verified by returning None from source
    #[test]
    fn test_file_system_error_source() {
        let err = file_system_error(
            "/tmp/profile.csv",
            "read shape profile",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("read shape profile"));
        assert!(message.contains("/tmp/profile.csv"));
        assert!(err.source().is_some());
    }

    // Tests trace errors report the line
    // Verified by printing a zero-based line number
    #[test]
    fn test_trace_parse_message() {
        let err = ShadowError::TraceParse {
            path: PathBuf::from("trace.csv"),
            line: 4,
            reason: "expected 5 fields".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid pen trace row 4 in 'trace.csv': expected 5 fields"
        );
    }

    // Tests invalid parameter helper fills every field
    // Verified by dropping the value from the message
    #[test]
    fn test_invalid_parameter() {
        let err = invalid_parameter("threshold", &120.0, &"must be within [0, 100]");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'threshold' = '120': must be within [0, 100]"
        );
    }

    // Tests io conversion and recoverable warning messages
    // Verified by changing the warning text
    #[test]
    fn test_conversions_and_warnings() {
        let err: ShadowError = std::io::Error::other("boom").into();
        assert!(matches!(err, ShadowError::FileSystem { .. }));

        assert_eq!(
            DegenerateGeometry::EmptySamplingDisk.to_string(),
            "sampling disk contains no pixels"
        );
        assert_eq!(
            ShadowError::EmptyCapture.to_string(),
            "No frames captured for animation export"
        );
    }
}
