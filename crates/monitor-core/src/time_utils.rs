use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve a timezone name to a [`Tz`].
///
/// `"auto"` selects the system timezone. Unrecognised names fall back to UTC
/// with a warning.
pub fn resolve_timezone(tz_name: &str) -> Tz {
    let name = if tz_name.eq_ignore_ascii_case("auto") {
        get_system_timezone()
    } else {
        tz_name.to_string()
    };
    name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("unrecognised timezone \"{}\", falling back to UTC", name);
        Tz::UTC
    })
}

/// Validate that `tz_name` is `"auto"` or a recognised IANA timezone identifier.
pub fn validate_timezone(tz_name: &str) -> bool {
    tz_name.eq_ignore_ascii_case("auto") || tz_name.parse::<Tz>().is_ok()
}

// ── Calendar dates ────────────────────────────────────────────────────────────

/// Calendar date of `now` as observed in `tz`.
pub fn date_in(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Today's calendar date in the named timezone.
pub fn today_in(tz_name: &str) -> NaiveDate {
    date_in(Utc::now(), resolve_timezone(tz_name))
}

// ── Two-digit years ───────────────────────────────────────────────────────────

/// Two-digit years below this value belong to the 2000s; the rest to the 1900s.
pub const CENTURY_PIVOT: u32 = 69;

/// Expand a two-digit year using [`CENTURY_PIVOT`].
///
/// Returns `None` unless `yy` is exactly two ASCII digits.
///
/// ```
/// use monitor_core::time_utils::expand_two_digit_year;
///
/// assert_eq!(expand_two_digit_year("24"), Some(2024));
/// assert_eq!(expand_two_digit_year("69"), Some(1969));
/// assert_eq!(expand_two_digit_year("2024"), None);
/// ```
pub fn expand_two_digit_year(yy: &str) -> Option<i32> {
    if yy.len() != 2 || !yy.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = yy.parse().ok()?;
    let year = if value < CENTURY_PIVOT {
        2000 + value
    } else {
        1900 + value
    };
    i32::try_from(year).ok()
}
