use jiff::{Timestamp, Zoned};

/// Format a unix timestamp (seconds) into a short relative string like
/// "2d ago", "3h ago", "15m ago", or "just now".
pub fn format_relative_secs(ts: i64) -> String {
    let now_secs = Timestamp::now().as_second();

    // Future or current timestamps read as just now.
    if now_secs <= ts {
        return "just now".to_string();
    }

    let delta = now_secs - ts;
    let days = delta / 86_400;
    if days > 0 {
        return format!("{days}d ago");
    }

    let hours = delta / 3_600;
    if hours > 0 {
        return format!("{hours}h ago");
    }

    let minutes = delta / 60;
    if minutes > 0 {
        return format!("{minutes}m ago");
    }

    "just now".to_string()
}

/// Relative-age formatting for zoned timestamps (favorite save times).
pub fn format_relative(ts: &Zoned) -> String {
    format_relative_secs(ts.timestamp().as_second())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::ToSpan;

    fn now_secs() -> i64 {
        Timestamp::now().as_second()
    }

    #[test]
    fn test_returns_just_now_for_current_and_future() {
        let now = now_secs();
        assert_eq!(format_relative_secs(now), "just now");
        assert_eq!(format_relative_secs(now + 10), "just now");
    }

    #[test]
    fn test_returns_minutes_hours_and_days() {
        let now = now_secs();

        assert_eq!(format_relative_secs(now - 30), "just now");
        assert_eq!(format_relative_secs(now - 5 * 60), "5m ago");
        assert_eq!(format_relative_secs(now - 2 * 3_600), "2h ago");
        assert_eq!(format_relative_secs(now - 3 * 86_400), "3d ago");
    }

    #[test]
    fn test_zoned_wrapper_agrees_with_seconds() {
        let five_minutes_ago = Zoned::now().checked_sub(5.minutes()).unwrap();
        assert_eq!(format_relative(&five_minutes_ago), "5m ago");
    }
}
