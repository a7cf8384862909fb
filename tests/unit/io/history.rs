//! Tests for history log parsing

#[cfg(test)]
mod tests {
    use shadow_haptics::io::history::{HistoryRecord, parse_history, read_history};
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str =
        "Date,Image1,Image2,Transparency,DeltaPixel,CDThreshold,RoughnessIndex,BrightnessIndex";

    // Tests a well-formed row maps each numeric column
    // Verified by shifting the column offsets by one
    #[test]
    fn test_parse_row() {
        let record = HistoryRecord::parse_row("2024-05-01,a.png,b.png,0.7,8.5,12,0.31,0.66")
            .expect("row should parse");

        assert!((record.transparency - 0.7).abs() < f64::EPSILON);
        assert!((record.delta_pixel - 8.5).abs() < f64::EPSILON);
        assert!((record.gradient_threshold - 12.0).abs() < f64::EPSILON);
        assert!((record.roughness_index - 0.31).abs() < f64::EPSILON);
        assert!((record.brightness_index - 0.66).abs() < f64::EPSILON);
    }

    // Tests header and malformed rows are skipped
    // Verified by keeping rows with unparsable numbers
    #[test]
    fn test_parse_history_skips_bad_rows() {
        let contents = format!(
            "{HEADER}\n\
             d,a,b,0.7,8,12,0.3,0.6\n\
             d,a,b,oops,8,12,0.3,0.6\n\
             d,a,b,0.7,8\n\
             d,a,b,0.5,NaN,12,0.3,0.6\n\
             d,a,b,0.2,4,30,0.9,0.1\n"
        );
        let records = parse_history(&contents);

        assert_eq!(records.len(), 2);
        assert!((records.first().map_or(0.0, |r| r.transparency) - 0.7).abs() < f64::EPSILON);
        assert!((records.last().map_or(0.0, |r| r.gradient_threshold) - 30.0).abs() < f64::EPSILON);
    }

    // Tests missing file yields empty history
    // Verified by propagating NotFound as an error
    #[test]
    fn test_read_missing_history() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let records = read_history(&dir.path().join("none.csv")).expect("missing log is not an error");
        assert!(records.is_empty());
    }

    // Tests reading from disk
    // Verified by skipping the first data row
    #[test]
    fn test_read_history_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("haptics_log.csv");
        fs::write(&path, format!("{HEADER}\nd,a,b,0.6,6,15,0.2,0.4\n")).expect("Failed to write log");

        let records = read_history(&path).expect("Failed to read log");
        assert_eq!(records.len(), 1);
    }

    // Tests directories are reported as read failures
    // Verified by treating every read error as an empty history
    #[test]
    fn test_read_directory_fails() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        assert!(read_history(dir.path()).is_err());
    }
}
