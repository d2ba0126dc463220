//! Strict parsing of ledger period timestamps.
//!
//! Timestamps are naive: they are interpreted literally, with no timezone
//! attached and no conversion applied.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-time formats tried in priority order.
const DATE_TIME_FORMATS: [&str; 2] = ["%d.%m.%Y %H:%M:%S", "%d.%m.%Y %H:%M"];

/// Calendar date format (also the format of report window boundaries).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// `dd.mm.yyyy` with exactly two-digit day/month and a four-digit year.
fn is_calendar_date(text: &[u8]) -> bool {
    text.len() == 10
        && text[2] == b'.'
        && text[5] == b'.'
        && [0, 1, 3, 4, 6, 7, 8, 9]
            .iter()
            .all(|&i| text[i].is_ascii_digit())
}

/// `h:mm`, `hh:mm`, `h:mm:ss` or `hh:mm:ss`.
fn is_clock(text: &[u8]) -> bool {
    let Some(hour_len) = text.iter().position(|&b| b == b':') else {
        return false;
    };
    if !(1..=2).contains(&hour_len) || !text[..hour_len].iter().all(u8::is_ascii_digit) {
        return false;
    }

    match text[hour_len..] {
        [b':', m1, m2] => m1.is_ascii_digit() && m2.is_ascii_digit(),
        [b':', m1, m2, b':', s1, s2] => [m1, m2, s1, s2].iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// Parse a ledger period.
///
/// Accepts `dd.mm.yyyy hh:mm:ss`, `dd.mm.yyyy hh:mm` and `dd.mm.yyyy` (midnight),
/// returning the first format that matches. The hour may have one digit; every
/// other field is fixed width, separated by a single literal `.`, ` ` or `:`.
/// `None` means no format matched.
pub fn parse_period(text: &str) -> Option<NaiveDateTime> {
    let bytes = text.as_bytes();
    if bytes.len() < 10 || !is_calendar_date(&bytes[..10]) {
        return None;
    }

    match &bytes[10..] {
        [] => parse_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)),
        [b' ', clock @ ..] if is_clock(clock) => DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok()),
        _ => None,
    }
}

/// Parse a calendar date in exact `dd.mm.yyyy` form.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if !is_calendar_date(text.as_bytes()) {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}
