/// Countdown display, `m:ss` (e.g. `59:07`).
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Elapsed-time display for results, `Xm Ys` (e.g. `45m 0s`).
pub fn format_duration(seconds: u32) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_pads_seconds() {
        assert_eq!(format_clock(3600), "60:00");
        assert_eq!(format_clock(3547), "59:07");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn test_duration_reads_naturally() {
        assert_eq!(format_duration(2700), "45m 0s");
        assert_eq!(format_duration(61), "1m 1s");
    }
}
