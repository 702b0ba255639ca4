/// Format a duration in seconds as `M:SS` (minutes unbounded, seconds
/// zero-padded). Truncates, never rounds. Negative input is out of contract.
pub fn format_time(seconds: f64) -> String {
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{mins}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_seconds_to_two_digits() {
        assert_eq!(format_time(125.0), "2:05");
        assert_eq!(format_time(59.0), "0:59");
        assert_eq!(format_time(60.0), "1:00");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_time(61.9), "1:01");
        assert_eq!(format_time(0.4), "0:00");
    }

    #[test]
    fn minutes_are_unbounded() {
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(3725.0), "62:05");
    }
}
