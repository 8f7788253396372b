//! Date and timestamp formats.

use chrono::{Local, NaiveDate};

/// Layout of the per-day log directory name.
pub const DIRECTORY_DATE_FORMAT: &str = "%Y_%m_%d";

/// Timestamp layout used by directly constructed loggers.
pub const PLAIN_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// ISO-8601 timestamp layout used by the router's streams.
pub const ISO8601_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Layout of dates inside object fields.
pub const FIELD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Name of the log directory for `date`, e.g. `2024_03_09`.
pub fn directory_date(date: NaiveDate) -> String {
    date.format(DIRECTORY_DATE_FORMAT).to_string()
}

/// Render an optional date for an object field, `nil` when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(FIELD_DATE_FORMAT).to_string(),
        None => "nil".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(directory_date(date), "2024_03_09");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(format_date(Some(date)), "1999-12-31");
        assert_eq!(format_date(None), "nil");
    }
}
