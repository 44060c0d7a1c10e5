//! Labels and hour helpers used by the calendar views.

use chrono::NaiveDateTime;

/// First and last hour (exclusive) drawn as working time in the day view.
pub const BUSINESS_HOURS: (u32, u32) = (9, 18);

/// "all-day", "09:00 - 10:30", or "3/20 22:00 - 3/21 02:00" for events crossing midnight.
pub fn event_time_label(start: NaiveDateTime, end: NaiveDateTime, all_day: bool) -> String {
    if all_day {
        return "all-day".to_string();
    }

    if start.date() == end.date() {
        format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
    } else {
        format!(
            "{} - {}",
            start.format("%-m/%-d %H:%M"),
            end.format("%-m/%-d %H:%M")
        )
    }
}

/// Human-readable length of an event, e.g. "45m", "2h", "1h 30m".
pub fn duration_label(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let minutes = (end - start).num_minutes().max(0);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

pub fn day_hours() -> std::ops::Range<u32> {
    0..24
}

pub fn is_business_hour(hour: u32) -> bool {
    (BUSINESS_HOURS.0..BUSINESS_HOURS.1).contains(&hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn time_label_same_day() {
        assert_eq!(event_time_label(at(20, 9, 0), at(20, 10, 30), false), "09:00 - 10:30");
    }

    #[test]
    fn time_label_across_days() {
        assert_eq!(
            event_time_label(at(20, 22, 0), at(21, 2, 0), false),
            "3/20 22:00 - 3/21 02:00"
        );
    }

    #[test]
    fn time_label_all_day() {
        assert_eq!(event_time_label(at(20, 0, 0), at(21, 0, 0), true), "all-day");
    }

    #[test]
    fn duration_labels() {
        assert_eq!(duration_label(at(20, 9, 0), at(20, 9, 45)), "45m");
        assert_eq!(duration_label(at(20, 9, 0), at(20, 11, 0)), "2h");
        assert_eq!(duration_label(at(20, 9, 0), at(20, 10, 30)), "1h 30m");
        assert_eq!(duration_label(at(20, 9, 0), at(20, 9, 0)), "0m");
    }

    #[test]
    fn business_hours() {
        assert!(!is_business_hour(8));
        assert!(is_business_hour(9));
        assert!(is_business_hour(17));
        assert!(!is_business_hour(18));
        assert_eq!(day_hours().count(), 24);
    }
}
