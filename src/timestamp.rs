//! Timestamp normalization across export dialects.
//!
//! Every dialect is tried against a fixed, ordered template list; the first
//! hit wins. Day-first templates come before month-first on purpose: the
//! order encodes disambiguation priority for ambiguous dates like `3/6/21`,
//! and reordering it changes locale behavior.

use chrono::{DateTime, Local, NaiveDateTime};
use tracing::warn;

/// Template list, in priority order. 12h clocks before 24h within a dialect,
/// day-first before month-first across dialects, ISO last.
const FORMATS: &[&str] = &[
    "%d/%m/%Y, %I:%M %p",
    "%d/%m/%y, %I:%M %p",
    "%d/%m/%Y, %H:%M",
    "%d/%m/%y, %H:%M",
    "%d/%m/%y, %I:%M:%S %p",
    "%d/%m/%Y, %I:%M:%S %p",
    "%d/%m/%Y, %H:%M:%S",
    "%d/%m/%y, %H:%M:%S",
    "%m/%d/%y, %I:%M %p",
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%y, %I:%M:%S %p",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.fZ",
];

/// Offset-bearing ISO templates, collapsed to their UTC-naive instant.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parses one raw timestamp string into a timezone-naive instant.
///
/// Never fails: if no template and no permissive ISO parse matches, the
/// current wall-clock time is returned and the second element is `true` so
/// callers can flag the record instead of silently trusting it.
pub fn parse_timestamp(raw: &str) -> (NaiveDateTime, bool) {
    let cleaned = normalize_raw(raw);

    for fmt in FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return (ts, false);
        }
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(&cleaned, fmt) {
            return (ts.naive_utc(), false);
        }
    }
    // Permissive ISO fallback for dialect stragglers.
    if let Ok(ts) = DateTime::parse_from_rfc3339(&cleaned) {
        return (ts.naive_utc(), false);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(&cleaned, "%Y-%m-%d %H:%M:%S%.f") {
        return (ts, false);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(&cleaned, "%Y-%m-%dT%H:%M%.f") {
        return (ts, false);
    }

    warn!(raw, "unparseable timestamp, substituting current time");
    (Local::now().naive_local(), true)
}

/// Collapses export quirks before template matching: surrounding whitespace,
/// the narrow no-break space some exports put before AM/PM, dashed date
/// separators, and `a.m.` / `p. m.` spellings.
fn normalize_raw(raw: &str) -> String {
    let mut s = raw.trim().replace(['\u{202F}', '\u{00A0}'], " ");

    // Dashed and dotted day/month dates become slashed and the date/time
    // separator becomes ", " so one template set covers every dialect. ISO
    // dates (4-digit year first) keep their dashes.
    if !s.starts_with(|c: char| c.is_ascii_digit())
        || s.split(['-', '/', '.', ',', ' ']).next().map(str::len) != Some(4)
    {
        if let Some((date, rest)) = s.split_once(|c: char| c == ',' || c == ' ') {
            s = format!(
                "{}, {}",
                date.replace(['-', '.'], "/"),
                rest.trim_start_matches([',', ' '])
            );
        }
    }

    normalize_meridiem(&s)
}

/// Rewrites any trailing `am` / `a.m.` / `p. m.` marker as `AM` / `PM`.
///
/// The markers are compared ASCII-case-insensitively against the tail of
/// the input itself. Lowercasing the whole string first would yield byte
/// offsets that need not be char boundaries of the original (some chars
/// change byte length under lowercasing), and this runs on arbitrary
/// JSON timestamp fields.
fn normalize_meridiem(s: &str) -> String {
    for (needle, marker) in [
        ("a.m.", "AM"), ("a. m.", "AM"), ("a.m", "AM"), ("am", "AM"),
        ("p.m.", "PM"), ("p. m.", "PM"), ("p.m", "PM"), ("pm", "PM"),
    ] {
        if s.len() < needle.len() || !s.is_char_boundary(s.len() - needle.len()) {
            continue;
        }
        let (head, tail) = s.split_at(s.len() - needle.len());
        if tail.eq_ignore_ascii_case(needle)
            && (head.ends_with([' ', '\t']) || needle.len() > 2)
        {
            return format!("{} {}", head.trim_end(), marker);
        }
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn test_day_first_24h() {
        assert_eq!(parse_timestamp("23/06/2018, 14:05"), (dt(2018, 6, 23, 14, 5, 0), false));
        assert_eq!(parse_timestamp("3/6/21, 09:30"), (dt(2021, 6, 3, 9, 30, 0), false));
    }

    #[test]
    fn test_day_first_12h() {
        assert_eq!(parse_timestamp("23/06/2018, 1:55 PM"), (dt(2018, 6, 23, 13, 55, 0), false));
        assert_eq!(parse_timestamp("23/06/18, 12:01 am"), (dt(2018, 6, 23, 0, 1, 0), false));
    }

    #[test]
    fn test_dotted_meridiem_spellings() {
        assert_eq!(parse_timestamp("23/06/2018, 1:55 p.m."), (dt(2018, 6, 23, 13, 55, 0), false));
        assert_eq!(parse_timestamp("23/06/2018, 1:55\u{202F}a.m."), (dt(2018, 6, 23, 1, 55, 0), false));
    }

    #[test]
    fn test_meridiem_non_ascii_tail_does_not_panic() {
        // 'İ' grows from two to three bytes when lowercased, so any offset
        // taken from a lowercased copy would not index the original safely.
        let (_, guessed) = parse_timestamp("İİİİa.m");
        assert!(guessed);
        assert_eq!(normalize_meridiem("İ 1:55 pm"), "İ 1:55 PM");
    }

    #[test]
    fn test_day_first_wins_over_month_first() {
        // 3/6 is ambiguous; day-first templates sit earlier in the list.
        assert_eq!(parse_timestamp("3/6/2021, 10:00").0, dt(2021, 6, 3, 10, 0, 0));
        // 13/6 only parses day-first.
        assert_eq!(parse_timestamp("13/6/2021, 10:00").0, dt(2021, 6, 13, 10, 0, 0));
        // 6/13 only parses month-first, reached by the later templates.
        assert_eq!(parse_timestamp("6/13/21, 10:00 AM").0, dt(2021, 6, 13, 10, 0, 0));
    }

    #[test]
    fn test_dashed_dates() {
        assert_eq!(parse_timestamp("23-06-2018, 14:05").0, dt(2018, 6, 23, 14, 5, 0));
        assert_eq!(parse_timestamp("23.06.18, 14:05:10").0, dt(2018, 6, 23, 14, 5, 10));
        assert_eq!(parse_timestamp("30/12/2020 13:00").0, dt(2020, 12, 30, 13, 0, 0));
    }

    #[test]
    fn test_iso_variants() {
        assert_eq!(parse_timestamp("2021-03-12T16:15:10"), (dt(2021, 3, 12, 16, 15, 10), false));
        assert_eq!(
            parse_timestamp("2021-03-12T16:15:10.250Z"),
            (dt(2021, 3, 12, 16, 15, 10).with_nanosecond(250_000_000).unwrap(), false)
        );
        // Offsets collapse to the UTC-naive instant.
        assert_eq!(
            parse_timestamp("2021-03-12T16:15:10+02:00"),
            (dt(2021, 3, 12, 14, 15, 10), false)
        );
    }

    #[test]
    fn test_with_seconds() {
        assert_eq!(
            parse_timestamp("23/10/21, 18:44:02"),
            (dt(2021, 10, 23, 18, 44, 2), false)
        );
        assert_eq!(
            parse_timestamp("23/10/2021, 6:44:02 PM"),
            (dt(2021, 10, 23, 18, 44, 2), false)
        );
    }

    #[test]
    fn test_garbage_falls_back_to_now_with_flag() {
        let before = Local::now().naive_local();
        let (ts, guessed) = parse_timestamp("not a timestamp");
        let after = Local::now().naive_local();
        assert!(guessed);
        assert!(ts >= before && ts <= after);
    }
}
