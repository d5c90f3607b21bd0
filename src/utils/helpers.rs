use std::time::Duration;

/// Formats a duration for operator-facing messages, truncated to whole
/// seconds so sub-second noise does not leak into failure reasons
pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(Duration::from_secs(duration.as_secs())).to_string()
}

/// First segment of a UUID-style id, for compact display
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_truncated_to_seconds() {
        assert_eq!(format_duration(Duration::from_millis(2750)), "2s");
        assert_eq!(format_duration(Duration::from_secs(75)), "1m 15s");
    }

    #[test]
    fn short_id_takes_first_segment() {
        assert_eq!(short_id("0a1b2c3d-4e5f-6071"), "0a1b2c3d");
        assert_eq!(short_id("plain"), "plain");
    }
}
