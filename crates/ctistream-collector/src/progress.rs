//! Progress reporting helpers for long collection runs

use std::time::Duration;

/// Format a duration as `dd:hh:mm:ss`.
pub fn format_elapsed(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{days:02}:{hours:02}:{minutes:02}:{seconds:02}")
}

/// Estimated time remaining given linear progress toward the budget.
///
/// Returns `None` until at least one message has been accepted.
pub fn estimate_remaining(accepted: usize, budget: usize, elapsed: Duration) -> Option<Duration> {
    if accepted == 0 || budget == 0 {
        return None;
    }
    let fraction = (accepted as f64 / budget as f64).min(1.0);
    let total = elapsed.as_secs_f64() / fraction;
    Some(Duration::from_secs_f64(total - elapsed.as_secs_f64()))
}

/// Percent of the message budget consumed.
pub fn percent_complete(accepted: usize, budget: usize) -> f64 {
    if budget == 0 {
        100.0
    } else {
        (accepted as f64 / budget as f64).min(1.0) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_days_hours_minutes_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00:00:00");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "00:00:01:01");
        assert_eq!(
            format_elapsed(Duration::from_secs(86_400 + 3_600 + 60 + 1)),
            "01:01:01:01"
        );
    }

    #[test]
    fn remaining_scales_linearly() {
        let remaining =
            estimate_remaining(50, 100, Duration::from_secs(10)).unwrap();
        assert_eq!(remaining.as_secs(), 10);
        assert!(estimate_remaining(0, 100, Duration::from_secs(10)).is_none());
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(percent_complete(5, 10), 50.0);
        assert_eq!(percent_complete(20, 10), 100.0);
    }
}
