//! Recording filename parsing.
//!
//! Recorder output is named `<channel>-<DD>-<Mon>-<YY>-<HH:MM:SS>.<ext...>`,
//! e.g. `azadi-01-Jul-24-02:34:07.audio.m4a`. Only the channel and the
//! calendar date survive parsing.

use chrono::NaiveDateTime;
use monitor_core::models::{Record, Rejection};
use monitor_core::time_utils::expand_two_digit_year;

/// Layout of the reassembled timestamp, after year expansion and width checks.
const TIMESTAMP_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

/// Minimum hyphen-separated segments in the stem: channel, day, month, year, time.
const MIN_SEGMENTS: usize = 5;

/// Parse a recording filename into a [`Record`].
///
/// Segments past the time are ignored, as is everything after the first `.`.
pub fn parse_filename(file_name: &str) -> Result<Record, Rejection> {
    let (stem, _extension) = file_name
        .split_once('.')
        .ok_or(Rejection::MissingExtension)?;

    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() < MIN_SEGMENTS {
        return Err(Rejection::TooFewSegments { found: parts.len() });
    }

    let channel = parts[0];
    let (day, month, year, time) = (parts[1], parts[2], parts[3], parts[4]);

    let full_year =
        expand_two_digit_year(year).ok_or_else(|| Rejection::InvalidYear(year.to_string()))?;

    let timestamp = format!("{day}-{month}-{full_year} {time}");
    if !is_fixed_width(day, 2) || !is_clock_time(time) {
        return Err(Rejection::InvalidTimestamp(timestamp));
    }

    let parsed = NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
        .map_err(|_| Rejection::InvalidTimestamp(timestamp.clone()))?;

    Ok(Record::new(channel, parsed.date()))
}

fn is_fixed_width(s: &str, width: usize) -> bool {
    s.len() == width && s.bytes().all(|b| b.is_ascii_digit())
}

/// `H:MM:SS` or `HH:MM:SS`; chrono alone would also take `2:3:7`.
fn is_clock_time(time: &str) -> bool {
    let mut fields = time.split(':');
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(hour), Some(minute), Some(second), None) => {
            (is_fixed_width(hour, 1) || is_fixed_width(hour, 2))
                && is_fixed_width(minute, 2)
                && is_fixed_width(second, 2)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── accepted names ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_typical_recording() {
        let record = parse_filename("azadi-01-Jul-24-02:34:07.audio.m4a").unwrap();
        assert_eq!(record.channel, "azadi");
        assert_eq!(record.date, date(2024, 7, 1));
        assert_eq!(record.date_key(), "2024-07-01");
    }

    #[test]
    fn test_time_of_day_does_not_affect_date() {
        let early = parse_filename("bbc-15-Mar-23-00:00:00.ts").unwrap();
        let late = parse_filename("bbc-15-Mar-23-23:59:59.ts").unwrap();
        assert_eq!(early, late);
        assert_eq!(early.date, date(2023, 3, 15));
    }

    #[test]
    fn test_channel_is_case_sensitive() {
        let record = parse_filename("VOA-02-Jan-25-10:00:00.mp4").unwrap();
        assert_eq!(record.channel, "VOA");
    }

    #[test]
    fn test_extra_segments_ignored() {
        let record = parse_filename("pars-09-Dec-22-08:15:00-part2.mkv").unwrap();
        assert_eq!(record.channel, "pars");
        assert_eq!(record.date, date(2022, 12, 9));
    }

    #[test]
    fn test_century_pivot() {
        assert_eq!(
            parse_filename("one-01-Jan-68-00:00:00.m4a").unwrap().date,
            date(2068, 1, 1)
        );
        assert_eq!(
            parse_filename("one-01-Jan-69-00:00:00.m4a").unwrap().date,
            date(1969, 1, 1)
        );
    }

    #[test]
    fn test_leap_day() {
        let record = parse_filename("itn-29-Feb-24-12:00:00.m4a").unwrap();
        assert_eq!(record.date, date(2024, 2, 29));
    }

    // ── rejected names ────────────────────────────────────────────────────────

    #[test]
    fn test_reject_without_dot() {
        assert_eq!(
            parse_filename("azadi-01-Jul-24-02:34:07"),
            Err(Rejection::MissingExtension)
        );
        assert_eq!(parse_filename(""), Err(Rejection::MissingExtension));
    }

    #[test]
    fn test_reject_too_few_segments() {
        assert_eq!(
            parse_filename("badfile.txt"),
            Err(Rejection::TooFewSegments { found: 1 })
        );
        assert_eq!(
            parse_filename("azadi-01-Jul-24.m4a"),
            Err(Rejection::TooFewSegments { found: 4 })
        );
    }

    #[test]
    fn test_reject_dot_entries() {
        // `ls -a` always lists these.
        assert!(parse_filename(".").is_err());
        assert!(parse_filename("..").is_err());
    }

    #[test]
    fn test_reject_bad_year() {
        assert_eq!(
            parse_filename("azadi-01-Jul-2024-02:34:07.m4a"),
            Err(Rejection::InvalidYear("2024".to_string()))
        );
    }

    #[test]
    fn test_reject_bad_month() {
        assert!(matches!(
            parse_filename("azadi-01-Foo-24-02:34:07.m4a"),
            Err(Rejection::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_reject_impossible_date() {
        assert!(matches!(
            parse_filename("azadi-31-Feb-24-02:34:07.m4a"),
            Err(Rejection::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_single_digit_hour_accepted() {
        let record = parse_filename("azadi-01-Jul-24-2:34:07.m4a").unwrap();
        assert_eq!(record.date, date(2024, 7, 1));
    }

    #[test]
    fn test_reject_single_digit_day() {
        assert!(matches!(
            parse_filename("azadi-1-Jul-24-02:34:07.m4a"),
            Err(Rejection::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_filename("azadi- 1-Jul-24-02:34:07.m4a"),
            Err(Rejection::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_reject_short_minute_and_second() {
        assert!(matches!(
            parse_filename("azadi-01-Jul-24-2:3:7.m4a"),
            Err(Rejection::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_filename("azadi-01-Jul-24-02:34.m4a"),
            Err(Rejection::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_reject_bad_time() {
        assert!(matches!(
            parse_filename("azadi-01-Jul-24-25:00:00.m4a"),
            Err(Rejection::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_filename("azadi-01-Jul-24-noon.m4a"),
            Err(Rejection::InvalidTimestamp(_))
        ));
    }
}
