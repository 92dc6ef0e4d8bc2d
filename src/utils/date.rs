use chrono::{DateTime, NaiveDate, Utc};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn today_str() -> String {
    today().format("%Y-%m-%d").to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// First 10 chars of an ISO date/datetime ("2024-01-05T00:00:00.000Z" → "2024-01-05").
/// Returns None for strings too short to hold a date.
pub fn iso_day(s: &str) -> Option<&str> {
    s.get(..10)
}

/// First 7 chars of an ISO date ("2024-01-05" → "2024-01").
pub fn iso_month(s: &str) -> Option<&str> {
    s.get(..7)
}

/// Parse an API date, which may be a plain date or a full RFC 3339 timestamp.
pub fn parse_api_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    iso_day(s.trim()).and_then(parse_date)
}

/// Parse an API date into an instant (plain dates are midnight UTC).
pub fn parse_api_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_api_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|ndt| ndt.and_utc())
}

/// "2024-01-05" → "Jan 5, 2024"; empty or unparsable → "--"
pub fn format_short(s: &str) -> String {
    parse_api_date(s)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_dates_accept_both_shapes() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_api_date("2024-01-05"), Some(d));
        assert_eq!(parse_api_date("2024-01-05T00:00:00.000Z"), Some(d));
        assert_eq!(parse_api_date("2024-1-5"), None);
        assert_eq!(parse_api_date(""), None);
    }

    #[test]
    fn prefixes_never_panic_on_short_input() {
        assert_eq!(iso_day("2024"), None);
        assert_eq!(iso_month("2024-02-01"), Some("2024-02"));
    }

    #[test]
    fn short_format() {
        assert_eq!(format_short("2024-03-09"), "Mar 9, 2024");
        assert_eq!(format_short(""), "--");
    }
}
