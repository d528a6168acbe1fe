use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

/// One recording file reduced to its channel and calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Channel name taken verbatim from the filename (case-sensitive).
    pub channel: String,
    /// Calendar date of the recording; time-of-day is discarded.
    pub date: NaiveDate,
}

impl Record {
    pub fn new(channel: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            channel: channel.into(),
            date,
        }
    }

    /// Canonical `YYYY-MM-DD` rendering of the date.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Why a filename was not accepted as a recording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No `.` in the name, so there is no extension to strip.
    #[error("missing file extension")]
    MissingExtension,

    /// The stem split on `-` produced fewer than five segments.
    #[error("expected at least 5 hyphen-separated segments, found {found}")]
    TooFewSegments { found: usize },

    /// The year segment is not exactly two ASCII digits.
    #[error("invalid two-digit year: {0}")]
    InvalidYear(String),

    /// Day, month or time did not form a valid timestamp.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Per-channel table of recording counts keyed by calendar date.
///
/// Channels and dates iterate in ascending order. A channel with an empty
/// table was configured but never observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelLedger {
    channels: BTreeMap<String, BTreeMap<NaiveDate, u32>>,
}

impl ChannelLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one accepted record, creating the channel on first sight.
    pub fn record(&mut self, record: &Record) {
        *self
            .channels
            .entry(record.channel.clone())
            .or_default()
            .entry(record.date)
            .or_insert(0) += 1;
    }

    /// Insert `channel` with an empty date table unless already present.
    ///
    /// Returns `true` when the channel was newly added.
    pub fn ensure_channel(&mut self, channel: &str) -> bool {
        if self.channels.contains_key(channel) {
            return false;
        }
        self.channels.insert(channel.to_string(), BTreeMap::new());
        true
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.channels.contains_key(channel)
    }

    /// Date table for `channel`, if the channel is known.
    pub fn dates(&self, channel: &str) -> Option<&BTreeMap<NaiveDate, u32>> {
        self.channels.get(channel)
    }

    /// Number of files seen for `channel` on `date` (0 when absent).
    pub fn count_on(&self, channel: &str, date: NaiveDate) -> u32 {
        self.channels
            .get(channel)
            .and_then(|dates| dates.get(&date))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all date counts for `channel` (0 when absent).
    pub fn total(&self, channel: &str) -> u64 {
        self.channels
            .get(channel)
            .map(|dates| dates.values().map(|&c| u64::from(c)).sum())
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<NaiveDate, u32>)> {
        self.channels.iter().map(|(name, dates)| (name.as_str(), dates))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Lifetime and same-day file counts for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub channel: String,
    /// Files across every date in the listing.
    pub total: u64,
    /// Files dated on the evaluation day.
    pub today: u64,
}

/// Counters describing one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    /// Lines examined.
    pub lines: usize,
    /// Lines long enough to carry a filename.
    pub candidates: usize,
    /// Filenames accepted as recordings.
    pub accepted: usize,
    /// Filenames rejected by the parser.
    pub rejected: usize,
}
