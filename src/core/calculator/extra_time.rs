//! Extra time worked beyond the daily baseline, from clock-in/clock-out.

use crate::utils::time::minutes_of_day;

/// Minutes worked beyond `baseline` (never negative).
///
/// Returns None when either time is missing or unparsable, or when `time_out`
/// is earlier than `time_in`: shifts crossing midnight are not supported.
pub fn extra_minutes(time_in: &str, time_out: &str, baseline: i64) -> Option<i64> {
    if time_in.trim().is_empty() || time_out.trim().is_empty() {
        return None;
    }

    let start = minutes_of_day(time_in)?;
    let end = minutes_of_day(time_out)?;

    let diff = end - start;
    if diff < 0 {
        return None;
    }

    Some((diff - baseline).max(0))
}

/// "{h}h {m}m" over the given baseline, "" when the inputs are invalid.
pub fn extra_time_with_baseline(time_in: &str, time_out: &str, baseline: i64) -> String {
    match extra_minutes(time_in, time_out, baseline) {
        Some(extra) => format!("{}h {}m", extra / 60, extra % 60),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extra_time(time_in: &str, time_out: &str) -> String {
        extra_time_with_baseline(time_in, time_out, 8 * 60)
    }

    #[test]
    fn exactly_eight_hours_is_zero() {
        assert_eq!(extra_time("09:30", "17:30"), "0h 0m");
    }

    #[test]
    fn ten_hours_is_two_over() {
        assert_eq!(extra_time("09:00", "19:00"), "2h 0m");
    }

    #[test]
    fn partial_hours_are_not_padded() {
        assert_eq!(extra_time("08:00", "17:05"), "1h 5m");
    }

    #[test]
    fn short_day_clamps_to_zero() {
        assert_eq!(extra_time("09:00", "12:00"), "0h 0m");
    }

    #[test]
    fn out_before_in_is_invalid() {
        assert_eq!(extra_time("09:00", "08:00"), "");
        assert_eq!(extra_time("22:00", "06:00"), "");
    }

    #[test]
    fn missing_or_garbage_input_is_empty() {
        assert_eq!(extra_time("", "17:00"), "");
        assert_eq!(extra_time("09:00", ""), "");
        assert_eq!(extra_time("nine", "17:00"), "");
    }

    #[test]
    fn custom_baseline() {
        assert_eq!(extra_minutes("09:00", "17:00", 450), Some(30));
        assert_eq!(extra_time_with_baseline("09:00", "17:00", 450), "0h 30m");
    }
}
