//! Main analysis pipeline for the recording monitor.
//!
//! Fetches a listing, aggregates it, and returns the per-channel summary
//! ready for the report layer.

use chrono::NaiveDate;
use monitor_core::error::Result;
use monitor_core::models::{AggregationStats, ChannelLedger, ChannelSummary};
use tracing::info;

use crate::aggregator::ListingAggregator;
use crate::remote::ListingSource;

// ── Public types ──────────────────────────────────────────────────────────────

/// The complete output of [`analyze_listing`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Per-channel date counts for this run.
    pub ledger: ChannelLedger,
    /// One summary per ledger channel, sorted by name.
    pub summaries: Vec<ChannelSummary>,
    /// Line counters from aggregation.
    pub stats: AggregationStats,
    /// Calendar date used for the same-day counts.
    pub today: NaiveDate,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline against `source`.
///
/// Transport errors are returned unchanged; nothing in the listing itself can
/// make this fail.
pub async fn analyze_listing<S: ListingSource>(
    source: &S,
    known_channels: &[String],
    today: NaiveDate,
) -> Result<AnalysisResult> {
    let listing = source.fetch_listing().await?;
    Ok(analyze_text(&listing, known_channels, today))
}

/// Aggregate an already-fetched listing.
pub fn analyze_text(listing: &str, known_channels: &[String], today: NaiveDate) -> AnalysisResult {
    let (ledger, stats) = ListingAggregator::aggregate_with_stats(listing.lines(), known_channels);
    let summaries = ListingAggregator::summarize(&ledger, today);

    info!(
        "Aggregated {} recordings across {} channels ({} lines, {} rejected)",
        stats.accepted,
        ledger.len(),
        stats.lines,
        stats.rejected
    );

    AnalysisResult {
        ledger,
        summaries,
        stats,
        today,
    }
}
