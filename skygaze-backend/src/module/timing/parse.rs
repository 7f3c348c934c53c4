///! Clock-time token parsing
///!
///! Providers hand back wall-clock tokens in either 12-hour ("7:12 PM") or
///! 24-hour ("19:12", "19:12:30") form. Tokens are interpreted in the
///! observer's approximate fixed offset on the requested date.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use regex::Regex;

/// Parse one time token into an offset-applied local instant
///
/// Returns `None` for anything that does not look like a clock time; callers
/// leave the corresponding field empty rather than failing the record.
pub fn parse_time_token(
    token: &str,
    date: NaiveDate,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let re = Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})(?::(\d{2}))?\s*(AM|PM)?\s*$").ok()?;
    let caps = re.captures(token)?;

    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let second: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match caps.get(4).map(|m| m.as_str().to_ascii_uppercase()) {
        Some(meridiem) => {
            // 12-hour clock: hour must be 1-12
            if !(1..=12).contains(&hour) {
                return None;
            }
            if meridiem == "PM" && hour != 12 {
                hour += 12;
            } else if meridiem == "AM" && hour == 12 {
                hour = 0;
            }
        }
        None => {
            if hour > 23 {
                return None;
            }
        }
    }

    let naive = date.and_hms_opt(hour, minute, second)?;
    offset.from_local_datetime(&naive).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(-5 * 3600).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn hm(token: &str) -> Option<String> {
        parse_time_token(token, date(), offset()).map(|t| t.format("%H:%M:%S").to_string())
    }

    #[test]
    fn test_twelve_hour_tokens() {
        assert_eq!(hm("7:12 PM").unwrap(), "19:12:00");
        assert_eq!(hm("7:12 AM").unwrap(), "07:12:00");
        assert_eq!(hm("12:05 AM").unwrap(), "00:05:00");
        assert_eq!(hm("12:30 PM").unwrap(), "12:30:00");
        assert_eq!(hm("4:31am").unwrap(), "04:31:00");
    }

    #[test]
    fn test_twenty_four_hour_tokens() {
        assert_eq!(hm("19:12").unwrap(), "19:12:00");
        assert_eq!(hm("04:31").unwrap(), "04:31:00");
        assert_eq!(hm("23:59").unwrap(), "23:59:00");
        assert_eq!(hm("0:05").unwrap(), "00:05:00");
    }

    #[test]
    fn test_seconds_accepted() {
        assert_eq!(hm("19:12:30").unwrap(), "19:12:30");
        assert_eq!(hm("7:12:45 PM").unwrap(), "19:12:45");
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(hm("  19:12  ").unwrap(), "19:12:00");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(hm("").is_none());
        assert!(hm("soon").is_none());
        assert!(hm("25:00").is_none());
        assert!(hm("13:00 PM").is_none());
        assert!(hm("0:00 AM").is_none());
        assert!(hm("12:60").is_none());
        assert!(hm("19:12 and more").is_none());
    }

    #[test]
    fn test_offset_carried_through() {
        let parsed = parse_time_token("19:12", date(), offset()).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(parsed.date_naive(), date());
    }
}
