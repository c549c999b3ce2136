use chrono::{DateTime, FixedOffset, Offset, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;

/// Fixed UTC offset that absolute dates are rendered in. Relative strings
/// only depend on the instant and ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayZone {
    offset: FixedOffset,
}

impl DisplayZone {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Returns `None` when the offset is a day or more away from UTC.
    pub fn from_minutes(minutes_east: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes_east.checked_mul(60)?).map(|offset| Self { offset })
    }

    fn local(&self, timestamp: DateTime<Utc>) -> DateTime<FixedOffset> {
        timestamp.with_timezone(&self.offset)
    }

    /// `Oct 15, 2023`
    pub fn format_date(&self, timestamp: DateTime<Utc>) -> String {
        self.local(timestamp).format("%b %-d, %Y").to_string()
    }

    /// `Oct 15, 2023, 9:30 AM`
    pub fn format_date_time(&self, timestamp: DateTime<Utc>) -> String {
        self.local(timestamp)
            .format("%b %-d, %Y, %-I:%M %p")
            .to_string()
    }

    /// `9:30 AM`
    pub fn format_time(&self, timestamp: DateTime<Utc>) -> String {
        self.local(timestamp).format("%-I:%M %p").to_string()
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::utc()
    }
}

pub fn format_date(timestamp: DateTime<Utc>) -> String {
    DisplayZone::utc().format_date(timestamp)
}

pub fn format_date_time(timestamp: DateTime<Utc>) -> String {
    DisplayZone::utc().format_date_time(timestamp)
}

pub fn format_time(timestamp: DateTime<Utc>) -> String {
    DisplayZone::utc().format_time(timestamp)
}

/// Coarse "N units ago" text. Months are a flat 30 days and years a flat 360.
/// Timestamps in the future read as "just now".
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = (now - timestamp).num_seconds();

    if delta < MINUTE {
        return "just now".to_string();
    }

    let (value, unit) = if delta < HOUR {
        (delta / MINUTE, "minute")
    } else if delta < DAY {
        (delta / HOUR, "hour")
    } else if delta < MONTH {
        (delta / DAY, "day")
    } else if delta < YEAR {
        (delta / MONTH, "month")
    } else {
        (delta / YEAR, "year")
    };

    if value == 1 {
        format!("{value} {unit} ago")
    } else {
        format!("{value} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 10, 15, 9, 30, 0).unwrap()
    }

    fn ago(seconds: i64) -> String {
        let now = base();
        format_relative(now - Duration::seconds(seconds), now)
    }

    #[test]
    fn under_a_minute_is_just_now() {
        assert_eq!(ago(0), "just now");
        assert_eq!(ago(59), "just now");
    }

    #[test]
    fn pluralizes_at_unit_boundaries() {
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(120), "2 minutes ago");
        assert_eq!(ago(3599), "59 minutes ago");
        assert_eq!(ago(3600), "1 hour ago");
        assert_eq!(ago(2 * 3600 + 59), "2 hours ago");
        assert_eq!(ago(86_400), "1 day ago");
        assert_eq!(ago(29 * 86_400), "29 days ago");
    }

    #[test]
    fn months_and_years_use_flat_lengths() {
        assert_eq!(ago(30 * 86_400), "1 month ago");
        assert_eq!(ago(359 * 86_400), "11 months ago");
        assert_eq!(ago(360 * 86_400), "1 year ago");
        assert_eq!(ago(365 * 86_400), "1 year ago");
        assert_eq!(ago(720 * 86_400), "2 years ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        assert_eq!(ago(-5), "just now");
        assert_eq!(ago(-3 * 86_400), "just now");
    }

    #[test]
    fn absolute_formats_match_us_display() {
        let timestamp = base();
        assert_eq!(format_date(timestamp), "Oct 15, 2023");
        assert_eq!(format_date_time(timestamp), "Oct 15, 2023, 9:30 AM");
        assert_eq!(format_time(timestamp), "9:30 AM");

        let afternoon = Utc.with_ymd_and_hms(2023, 10, 5, 14, 5, 0).unwrap();
        assert_eq!(format_time(afternoon), "2:05 PM");
        assert_eq!(format_date(afternoon), "Oct 5, 2023");

        let midnight = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_time(midnight), "12:00 AM");
    }

    #[test]
    fn display_zone_shifts_calendar_day() {
        let zone = DisplayZone::from_minutes(-5 * 60).unwrap();
        let early = Utc.with_ymd_and_hms(2023, 10, 15, 2, 0, 0).unwrap();
        assert_eq!(zone.format_date(early), "Oct 14, 2023");
        assert_eq!(zone.format_time(early), "9:00 PM");
        assert!(DisplayZone::from_minutes(24 * 60).is_none());
    }
}
