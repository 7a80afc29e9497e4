//! sound-scout: one pass over the chart, video-search and profile sources,
//! printed as a plain-text report on stdout. Logs go to stderr.
//!
//! Exits 0 once the run completes, whatever the individual sources did.

use std::io::Write;

use sound_scout::{fetcher_for, report, run_with, Metrics, ScoutConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sound_scout=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local .env may carry RUST_LOG; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let metrics = Metrics::init()
        .map_err(|e| tracing::warn!(error = ?e, "metrics disabled"))
        .ok();

    let cfg = ScoutConfig::load_default().unwrap_or_else(|e| {
        tracing::warn!(error = ?e, "config unreadable, using defaults");
        ScoutConfig::default()
    });

    let fetcher = fetcher_for(&cfg)?;
    let report = run_with(fetcher, &cfg).await;

    if let Some(m) = &metrics {
        tracing::debug!(target: "sound_scout::metrics", "run metrics\n{}", m.render());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::render(&report, &mut out)?;
    out.flush()?;
    Ok(())
}
