//! HTTP-date parsing and formatting.
//!
//! Accepts the three formats of RFC 7231 section 7.1.1.1:
//!
//! 1. IMF-fixdate (preferred): `Sun, 06 Nov 1994 08:49:37 GMT`
//! 2. RFC 850: `Sunday, 06-Nov-94 08:49:37 GMT`
//! 3. ANSI C `asctime()`: `Sun Nov  6 08:49:37 1994`
//!
//! RFC 2822 dates with a numeric offset are accepted as a last resort.

use chrono::{DateTime, NaiveDateTime, Utc};

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Parses an HTTP-date. Returns `None` for anything unrecognized.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use revalidate_http::date::parse_http_date;
///
/// let expected = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
/// assert_eq!(parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT"), Some(expected));
/// assert_eq!(parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"), Some(expected));
/// assert_eq!(parse_http_date("Sun Nov  6 08:49:37 1994"), Some(expected));
/// assert_eq!(parse_http_date("yesterday"), None);
/// ```
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(value, IMF_FIXDATE)
        .or_else(|_| NaiveDateTime::parse_from_str(value, RFC_850))
        .or_else(|_| NaiveDateTime::parse_from_str(value, ASCTIME))
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc2822(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Formats an instant as IMF-fixdate.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use revalidate_http::date::format_http_date;
///
/// let instant = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
/// assert_eq!(format_http_date(instant), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
pub fn format_http_date(instant: DateTime<Utc>) -> String {
    instant.format(IMF_FIXDATE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc2822_with_offset() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 10:49:37 +0200").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap());
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_http_date(""), None);
        assert_eq!(parse_http_date("   "), None);
        assert_eq!(parse_http_date("0"), None);
        assert_eq!(parse_http_date("Sun, 32 Nov 1994 08:49:37 GMT"), None);
    }

    #[test]
    fn test_format_parse_agree() {
        let instant = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        assert_eq!(parse_http_date(&format_http_date(instant)), Some(instant));
    }
}
