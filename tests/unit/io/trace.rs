//! Tests for pen trace parsing

#[cfg(test)]
mod tests {
    use shadow_haptics::ShadowError;
    use shadow_haptics::io::trace::{parse_trace, read_trace};
    use std::path::Path;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    const HEADER: &str = "t_ms,x,y,tilt_x,tilt_y\n";

    fn trace_error_line(contents: &str) -> usize {
        match parse_trace(contents, Path::new("t.csv")) {
            Err(ShadowError::TraceParse { line, .. }) => line,
            other => panic!("expected trace error, got {other:?}"),
        }
    }

    // Tests rows map to offsets, positions and tilts
    // Verified by reading tilt columns in swapped order
    #[test]
    fn test_parse_rows() {
        let contents = format!("{HEADER}0,10,20,0.5,-0.25\n\n16.5,11,21,0.4,0\n");
        let samples = parse_trace(&contents, Path::new("t.csv")).expect("Failed to parse trace");

        assert_eq!(samples.len(), 2);
        let second = samples.last().expect("second sample");
        assert_eq!(second.offset, Duration::from_micros(16_500));
        assert!((second.position.x - 11.0).abs() < f64::EPSILON);
        assert!((second.position.y - 21.0).abs() < f64::EPSILON);

        let first = samples.first().expect("first sample");
        assert!((first.tilt.x - 0.5).abs() < f64::EPSILON);
        assert!((first.tilt.y + 0.25).abs() < f64::EPSILON);
    }

    // Tests header-only trace is empty
    // Verified by parsing the header as data
    #[test]
    fn test_header_only() {
        let samples = parse_trace(HEADER, Path::new("t.csv")).expect("Failed to parse trace");
        assert!(samples.is_empty());
    }

    // Tests malformed rows report one-based line numbers
    // Verified by reporting the zero-based index
    #[test]
    fn test_malformed_rows() {
        assert_eq!(trace_error_line(&format!("{HEADER}0,1,2,3\n")), 2);
        assert_eq!(trace_error_line(&format!("{HEADER}0,1,2,3,4\n5,x,2,3,4\n")), 3);
        assert_eq!(trace_error_line(&format!("{HEADER}0,1,inf,3,4\n")), 2);
        assert_eq!(trace_error_line(&format!("{HEADER}-1,1,2,3,4\n")), 2);
    }

    // Tests decreasing timestamps are rejected
    // Verified by removing the ordering check
    #[test]
    fn test_decreasing_timestamps() {
        assert_eq!(
            trace_error_line(&format!("{HEADER}20,1,2,0,0\n10,1,2,0,0\n")),
            3
        );
    }

    // Tests timestamps too large for a duration are rejected instead of panicking
    // Verified by converting with the panicking duration constructor
    #[test]
    fn test_overflowing_timestamp() {
        assert_eq!(trace_error_line(&format!("{HEADER}1e300,0,0,0,0\n")), 2);
        assert_eq!(
            trace_error_line(&format!("{HEADER}0,0,0,0,0\n1e30,0,0,0,0\n")),
            3
        );
    }

    // Tests offsets past the clock's range yield no event
    // Verified by adding the offset to the origin unchecked
    #[test]
    fn test_to_event_clock_overflow() {
        let samples = parse_trace(&format!("{HEADER}1.8e22,0,0,0,0\n"), Path::new("t.csv"))
            .expect("offset fits a duration");
        let sample = samples.first().expect("sample");

        assert!(sample.to_event(Instant::now()).is_none());
    }

    // Tests events are timed from a shared origin
    // Verified by ignoring the sample offset
    #[test]
    fn test_to_event() {
        let samples = parse_trace(&format!("{HEADER}250,3,4,0.1,0.2\n"), Path::new("t.csv"))
            .expect("Failed to parse trace");
        let origin = Instant::now();
        let sample = samples.first().expect("sample");
        assert_eq!(sample.line, 2);
        let event = sample.to_event(origin).expect("event within clock range");

        assert_eq!(event.at - origin, Duration::from_millis(250));
        assert!((event.position.x - 3.0).abs() < f64::EPSILON);
    }

    // Tests reading from disk and missing files
    // Verified by returning an empty trace for a missing file
    #[test]
    fn test_read_trace() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("trace.csv");
        std::fs::write(&path, format!("{HEADER}0,1,2,0,0\n")).expect("Failed to write trace");

        assert_eq!(read_trace(&path).expect("Failed to read trace").len(), 1);
        assert!(matches!(
            read_trace(&dir.path().join("missing.csv")),
            Err(ShadowError::FileSystem { .. })
        ));
    }
}
