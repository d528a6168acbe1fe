mod bootstrap;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use monitor_core::settings::Settings;
use monitor_core::time_utils::today_in;
use monitor_data::analysis::analyze_listing;
use monitor_data::remote::{ListingSource, RemoteTarget, SshListing};
use monitor_report::{PrtgReport, ReportLimits};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.effective_log_level())?;
    settings.validate()?;

    tracing::info!(
        "rec-monitor v{} starting for node {}",
        env!("CARGO_PKG_VERSION"),
        settings.name
    );

    let channels = settings.channel_names();
    let target = RemoteTarget::from_settings(&settings);
    tracing::info!(
        "Listing {} on {}:{} for channels [{}]",
        target.path,
        target.hostname,
        target.port,
        channels.join(", ")
    );

    // An unreadable key aborts the run without a report.
    target.validate_key()?;

    let today = today_in(&settings.timezone);
    let limits = ReportLimits::from_settings(&settings);
    let source = SshListing::new(target);

    let report = build_report(&source, &channels, today, &limits, &settings.name).await?;
    println!("{}", report.to_xml()?);

    Ok(())
}

/// Fetch, aggregate and turn the outcome into a report.
///
/// Connection failures produce a failure report; any other error is returned.
async fn build_report<S: ListingSource>(
    source: &S,
    channels: &[String],
    today: NaiveDate,
    limits: &ReportLimits,
    node: &str,
) -> Result<PrtgReport> {
    match analyze_listing(source, channels, today).await {
        Ok(result) => {
            let text = format!(
                "{}: {} recordings in {} channels",
                node,
                result.stats.accepted,
                result.summaries.len()
            );
            Ok(PrtgReport::success(&result.summaries, limits, Some(text)))
        }
        Err(e) if e.is_connection_failure() => {
            tracing::warn!("Connection to recording server failed: {}", e);
            Ok(PrtgReport::connection_failure(Some(format!("{node}: {e}"))))
        }
        Err(e) => Err(e.into()),
    }
}
