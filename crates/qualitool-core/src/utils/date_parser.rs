use arrow_array::{Date32Array, StringArray};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Days between 0001-01-01 and 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Formats tried, in order, when a rule does not name its own.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Parse every value into days since epoch. Missing or unparseable values become null.
pub fn parse_date_column<S: AsRef<str>>(array: &StringArray, formats: &[S]) -> Date32Array {
    array
        .iter()
        .map(|opt_str| opt_str.and_then(|date| parse_date(date, formats)))
        .map(|opt_date| opt_date.map(|date| date.num_days_from_ce() - EPOCH_DAYS_FROM_CE))
        .collect()
}

/// Try each format in turn, then RFC 3339. Surrounding whitespace is ignored.
pub fn parse_date<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    formats
        .iter()
        .find_map(|format| {
            let format = format.as_ref();
            NaiveDate::parse_from_str(value, format)
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(value, format)
                        .ok()
                        .map(|dt| dt.date())
                })
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
