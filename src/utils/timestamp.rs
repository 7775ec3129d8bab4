use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Naive date-time layouts accepted in the timestamp column, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    // Slash dates read month first; day first only when the month slot exceeds 12
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Layouts carrying a UTC offset; the local wall-clock time is kept
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Parse a timestamp cell into a naive local date-time
///
/// Surrounding whitespace and quotes are ignored. A bare date parses as midnight.
///
/// # Examples
/// ```
/// use traffic_heatmap::utils::timestamp::parse_timestamp;
///
/// let ts = parse_timestamp("2024-03-07T09:15:00Z").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-07 09:15:00");
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_local());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_common_layouts() {
        assert_eq!(parse_timestamp("2024-03-07 09:15:30"), Some(expected(9, 15, 30)));
        assert_eq!(parse_timestamp("2024-03-07T09:15:30"), Some(expected(9, 15, 30)));
        assert_eq!(parse_timestamp("2024-03-07 09:15"), Some(expected(9, 15, 0)));
        assert_eq!(parse_timestamp("03/07/2024 09:15"), Some(expected(9, 15, 0)));
        assert_eq!(parse_timestamp("2024-03-07"), Some(expected(0, 0, 0)));
    }

    #[test]
    fn test_parse_keeps_local_wall_clock_for_offsets() {
        assert_eq!(
            parse_timestamp("2024-03-07T09:15:30-06:00"),
            Some(expected(9, 15, 30))
        );
        assert_eq!(
            parse_timestamp("2024-03-07 09:15:30+00:00"),
            Some(expected(9, 15, 30))
        );
    }

    #[test]
    fn test_slash_dates_read_month_first() {
        let may_14 = NaiveDate::from_ymd_opt(2024, 5, 14)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let july_3 = NaiveDate::from_ymd_opt(2024, 7, 3)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        assert_eq!(parse_timestamp("05/14/2024 08:00"), Some(may_14));
        assert_eq!(parse_timestamp("07/03/2024 08:00"), Some(july_3));
        assert_eq!(parse_timestamp("07/03/2024 08:00:00"), Some(july_3));
        // Only readable day first
        assert_eq!(parse_timestamp("14/05/2024 08:00"), Some(may_14));
    }

    #[test]
    fn test_parse_offset_without_colon() {
        let local = NaiveDate::from_ymd_opt(2024, 5, 14)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-05-14T08:00:00-0600"), Some(local));
        assert_eq!(parse_timestamp("2024-05-14 08:00:00-0600"), Some(local));
    }

    #[test]
    fn test_parse_tolerates_padding_and_fractions() {
        assert_eq!(
            parse_timestamp("  \"2024-03-07 09:15:30\" "),
            Some(expected(9, 15, 30))
        );
        let with_fraction = parse_timestamp("2024-03-07 09:15:30.125").unwrap();
        assert_eq!(with_fraction.date(), expected(0, 0, 0).date());
        assert_eq!(with_fraction.format("%H:%M:%S%.3f").to_string(), "09:15:30.125");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-45 99:00:00"), None);
    }
}
