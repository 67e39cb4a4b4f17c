//! Primitive coercions from wire strings.
//!
//! The API sends almost every scalar as a string. These functions turn that
//! text into booleans, numbers, durations and timestamps, rejecting anything
//! that does not match the expected layout exactly.
//!
//! Booleans use a single digit: `"1"` is true and `"0"` is false, for every
//! boolean field the API exposes.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::error::CoercionError;

/// Wire digit for `true`.
pub const WIRE_TRUE: &str = "1";

/// Wire digit for `false`.
pub const WIRE_FALSE: &str = "0";

/// Parse a single-digit wire boolean.
///
/// # Examples
///
/// ```
/// use tl_client::wire::coerce_bool;
///
/// assert_eq!(coerce_bool("1"), Ok(true));
/// assert_eq!(coerce_bool("0"), Ok(false));
/// assert!(coerce_bool("").is_err());
/// assert!(coerce_bool("true").is_err());
/// ```
pub fn coerce_bool(s: &str) -> Result<bool, CoercionError> {
    match s {
        WIRE_TRUE => Ok(true),
        WIRE_FALSE => Ok(false),
        _ => Err(CoercionError::new("a boolean digit (\"0\" or \"1\")", s)),
    }
}

/// Render a boolean the way the API expects it in queries.
pub fn bool_to_wire(b: bool) -> &'static str {
    if b { WIRE_TRUE } else { WIRE_FALSE }
}

/// Parse a base-10 signed integer.
pub fn coerce_int(s: &str) -> Result<i64, CoercionError> {
    s.parse::<i64>().map_err(|_| CoercionError::new("an integer", s))
}

/// Parse a base-10 float at single precision.
///
/// Non-finite values (`NaN`, `inf`) are rejected; the API only ever sends
/// plain decimal numbers.
pub fn coerce_float(s: &str) -> Result<f32, CoercionError> {
    match s.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoercionError::new("a decimal number", s)),
    }
}

/// Parse an `HH:MM:SS` duration.
///
/// The input must be exactly 8 characters. Fields are not range-checked,
/// so `"00:75:00"` is 75 minutes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tl_client::wire::coerce_duration;
///
/// assert_eq!(coerce_duration("00:12:27"), Ok(Duration::from_secs(12 * 60 + 27)));
/// assert!(coerce_duration("-1:07").is_err());
/// assert!(coerce_duration("0:12:27").is_err());
/// ```
pub fn coerce_duration(s: &str) -> Result<Duration, CoercionError> {
    let err = || CoercionError::new("a duration in HH:MM:SS layout", s);

    let bytes = s.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return Err(err());
    }

    let hours = parse_digits(&bytes[0..2]).ok_or_else(err)?;
    let minutes = parse_digits(&bytes[3..5]).ok_or_else(err)?;
    let seconds = parse_digits(&bytes[6..8]).ok_or_else(err)?;

    Ok(Duration::from_secs(
        u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds),
    ))
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// The result is naive: the API reports local Lausanne time without an
/// offset, and we keep it that way.
///
/// # Examples
///
/// ```
/// use tl_client::wire::coerce_timestamp;
///
/// let ts = coerce_timestamp("2018-12-07 14:22:00").unwrap();
/// assert_eq!(ts.to_string(), "2018-12-07 14:22:00");
///
/// assert!(coerce_timestamp("2018-12-07T14:22:00").is_err());
/// assert!(coerce_timestamp("2018-12-07 14:22").is_err());
/// ```
pub fn coerce_timestamp(s: &str) -> Result<NaiveDateTime, CoercionError> {
    let err = || CoercionError::new("a timestamp in YYYY-MM-DD HH:MM:SS layout", s);

    let bytes = s.as_bytes();
    if bytes.len() != 19
        || bytes[4] != b'-'
        || bytes[7] != b'-'
        || bytes[10] != b' '
        || bytes[13] != b':'
        || bytes[16] != b':'
    {
        return Err(err());
    }

    let year = parse_digits(&bytes[0..4]).ok_or_else(err)?;
    let month = parse_digits(&bytes[5..7]).ok_or_else(err)?;
    let day = parse_digits(&bytes[8..10]).ok_or_else(err)?;
    let hour = parse_digits(&bytes[11..13]).ok_or_else(err)?;
    let minute = parse_digits(&bytes[14..16]).ok_or_else(err)?;
    let second = parse_digits(&bytes[17..19]).ok_or_else(err)?;

    let year = i32::try_from(year).map_err(|_| err())?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(err)?;

    Ok(date.and_time(time))
}

/// Parse a run of ASCII digits into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        let d = (b as char).to_digit(10)?;
        acc.checked_mul(10)?.checked_add(d)
    })
}
