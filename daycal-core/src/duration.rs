//! Human-readable durations, e.g. "1 Day 3 Hours 5 Seconds".

use chrono::TimeDelta;

/// Render the magnitude of `delta` from years down to seconds, leaving out
/// zero units. Spans under a second are given in milliseconds.
///
/// With `surround`, every number is wrapped in that character:
/// `` `1` Minute `1` Second ``.
pub fn format_duration(delta: TimeDelta, surround: Option<char>) -> String {
    let delta = delta.abs();
    let days = delta.num_days();

    let units = [
        (days / 365, "Year"),
        (days % 365, "Day"),
        (delta.num_hours() % 24, "Hour"),
        (delta.num_minutes() % 60, "Minute"),
        (delta.num_seconds() % 60, "Second"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|&(value, unit)| {
            let plural = if value > 1 { "s" } else { "" };
            format!("{} {}{}", wrap(value, surround), unit, plural)
        })
        .collect();

    if parts.is_empty() {
        return format!("{} Milliseconds", wrap(delta.num_milliseconds(), surround));
    }

    parts.join(" ")
}

fn wrap(value: i64, surround: Option<char>) -> String {
    match surround {
        Some(c) => format!("{c}{value}{c}"),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_and_second() {
        let delta = TimeDelta::seconds(61);

        assert_eq!(format_duration(delta, None), "1 Minute 1 Second");
        assert_eq!(format_duration(delta, Some('`')), "`1` Minute `1` Second");
    }

    #[test]
    fn test_plurals_and_skipped_units() {
        let delta = TimeDelta::days(2) + TimeDelta::seconds(5);

        assert_eq!(format_duration(delta, None), "2 Days 5 Seconds");
    }

    #[test]
    fn test_years_split_from_days() {
        let delta = TimeDelta::days(365 * 2 + 1) + TimeDelta::hours(3);

        assert_eq!(format_duration(delta, None), "2 Years 1 Day 3 Hours");
    }

    #[test]
    fn test_sub_second_falls_back_to_milliseconds() {
        assert_eq!(format_duration(TimeDelta::milliseconds(1), None), "1 Milliseconds");
        assert_eq!(format_duration(TimeDelta::zero(), Some('*')), "*0* Milliseconds");
    }

    #[test]
    fn test_milliseconds_dropped_when_larger_units_present() {
        let delta = TimeDelta::seconds(1) + TimeDelta::milliseconds(250);

        assert_eq!(format_duration(delta, None), "1 Second");
    }

    #[test]
    fn test_negative_duration_uses_magnitude() {
        assert_eq!(format_duration(TimeDelta::hours(-5), None), "5 Hours");
    }
}
