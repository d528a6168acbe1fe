//! Per-channel recording counts built from a long-format directory listing.

use chrono::NaiveDate;
use monitor_core::models::{AggregationStats, ChannelLedger, ChannelSummary};
use tracing::debug;

use crate::parser::parse_filename;

/// Field index of the filename in `ls -l` output.
const FILENAME_FIELD: usize = 8;

// ── ListingAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that folds listing lines into a [`ChannelLedger`].
pub struct ListingAggregator;

impl ListingAggregator {
    /// Aggregate a whole listing blob, one entry per line.
    pub fn aggregate(listing: &str, known_channels: &[String]) -> ChannelLedger {
        Self::aggregate_with_stats(listing.lines(), known_channels).0
    }

    /// Aggregate an explicit sequence of listing lines.
    pub fn aggregate_lines<'a>(
        lines: impl IntoIterator<Item = &'a str>,
        known_channels: &[String],
    ) -> ChannelLedger {
        Self::aggregate_with_stats(lines, known_channels).0
    }

    /// Aggregate `lines` and report how many were accepted or rejected.
    ///
    /// Lines with fewer than nine whitespace-separated fields are skipped.
    /// Every name in `known_channels` is present in the result, with an empty
    /// date table if nothing was recorded for it.
    pub fn aggregate_with_stats<'a>(
        lines: impl IntoIterator<Item = &'a str>,
        known_channels: &[String],
    ) -> (ChannelLedger, AggregationStats) {
        let mut ledger = ChannelLedger::new();
        let mut stats = AggregationStats::default();

        for line in lines {
            stats.lines += 1;
            let Some(file_name) = line.split_whitespace().nth(FILENAME_FIELD) else {
                continue;
            };
            stats.candidates += 1;

            match parse_filename(file_name) {
                Ok(record) => {
                    ledger.record(&record);
                    stats.accepted += 1;
                }
                Err(reason) => {
                    debug!("Skipping file {}: {}", file_name, reason);
                    stats.rejected += 1;
                }
            }
        }

        for channel in known_channels {
            if ledger.ensure_channel(channel) {
                debug!("No recordings for configured channel {}", channel);
            }
        }

        (ledger, stats)
    }

    /// Derive lifetime and same-day counts for every channel in `ledger`.
    ///
    /// `today` is compared as a calendar date against each stored date.
    /// Summaries are sorted by channel name.
    pub fn summarize(ledger: &ChannelLedger, today: NaiveDate) -> Vec<ChannelSummary> {
        ledger
            .iter()
            .map(|(channel, dates)| ChannelSummary {
                channel: channel.to_string(),
                total: dates.values().map(|&c| u64::from(c)).sum(),
                today: dates.get(&today).copied().map(u64::from).unwrap_or(0),
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
