// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod harvest;
pub mod report;
pub mod runner;
pub mod telemetry;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::config::ScoutConfig;
pub use crate::error::{ExtractError, FailureReason, FetchError};
pub use crate::fetch::{FetchResult, FetchedBody, Fetcher, HttpFetcher};
pub use crate::harvest::{
    plan_from_config, Extraction, Harvester, SourceDescriptor, Stage, VideoSearch,
};
pub use crate::report::{render, RunReport, Tally};
pub use crate::telemetry::Metrics;
pub use crate::types::{
    LabeledMetric, MediaRecord, RankedRecord, Record, SourceHealth, SourceKind, SourceResult,
};

use tracing::{info, warn};

/// Build the plan described by `cfg` and run it once with the given fetcher.
pub async fn run_with<F: Fetcher>(fetcher: F, cfg: &ScoutConfig) -> RunReport {
    let stages = plan_from_config(cfg);
    let report = Harvester::new(fetcher).run_all(&stages).await;
    let t = report.tally();
    info!(
        working = t.working,
        empty = t.empty,
        dynamic = t.dynamic,
        failed = t.failed,
        "run finished"
    );
    report
}

/// HTTP fetcher carrying the configured identity.
///
/// A bad `extra_headers` entry is logged and the fetcher is built from the
/// user agent alone, the same way an unreadable config falls back to defaults.
pub fn fetcher_for(cfg: &ScoutConfig) -> anyhow::Result<HttpFetcher> {
    match HttpFetcher::with_headers(&cfg.user_agent, &cfg.extra_headers) {
        Ok(f) => Ok(f),
        Err(e) => {
            warn!(error = ?e, "extra headers rejected, sending user agent only");
            HttpFetcher::new(&cfg.user_agent)
        }
    }
}
