// src/runner.rs
use std::future::Future;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::error::{ExtractError, FailureReason};
use crate::fetch::FetchResult;
use crate::types::{Record, SourceKind, SourceResult};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("harvest_records_total", "Records extracted across sources.");
        describe_counter!("harvest_source_errors_total", "Sources that ended in an error.");
        describe_counter!("harvest_source_empty_total", "Sources fetched with zero matches.");
        describe_histogram!("harvest_fetch_ms", "Fetch time in milliseconds.");
    });
}

/// Fetch once, extract once, and fold every failure into the result.
///
/// The extractor is only called on a successful fetch. Nothing is propagated:
/// whatever happens, the caller gets a `SourceResult` back.
pub async fn run_source<Fut, E, T>(
    name: &str,
    kind: SourceKind,
    fetch: Fut,
    extract: E,
) -> SourceResult
where
    Fut: Future<Output = FetchResult>,
    E: FnOnce(&str) -> Result<Vec<T>, ExtractError>,
    T: Into<Record>,
{
    ensure_metrics_described();

    let t0 = Instant::now();
    let fetched = fetch.await;
    histogram!("harvest_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    let body = match fetched {
        Ok(b) => b,
        Err(e) => return failed(name, kind, e.into()),
    };

    match extract(&body.text) {
        Ok(items) => {
            let records: Vec<Record> = items.into_iter().map(Into::into).collect();
            if records.is_empty() {
                counter!("harvest_source_empty_total").increment(1);
            }
            counter!("harvest_records_total").increment(records.len() as u64);
            tracing::info!(
                source = name,
                status = body.status,
                records = records.len(),
                "source done"
            );
            SourceResult::ok(name, kind, records)
        }
        Err(e) => failed(name, kind, e.into()),
    }
}

fn failed(name: &str, kind: SourceKind, reason: FailureReason) -> SourceResult {
    tracing::warn!(source = name, error = %reason, "source failed");
    counter!("harvest_source_errors_total").increment(1);
    SourceResult::failed(name, kind, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::FetchedBody;
    use crate::types::{LabeledMetric, SourceHealth};
    use std::cell::Cell;

    #[tokio::test]
    async fn fetch_failure_skips_the_extractor() {
        let called = Cell::new(false);
        let res = run_source(
            "ig",
            SourceKind::LabeledMetric,
            async { Err(FetchError::Timeout) },
            |_| {
                called.set(true);
                Ok(Vec::<LabeledMetric>::new())
            },
        )
        .await;

        assert!(!called.get());
        assert!(res.records.is_empty());
        assert_eq!(res.error, Some(FailureReason::Fetch(FetchError::Timeout)));
    }

    #[tokio::test]
    async fn extractor_error_is_folded_into_the_result() {
        let res = run_source(
            "kworb",
            SourceKind::RankedList,
            async {
                Ok(FetchedBody {
                    text: "<tr>".into(),
                    status: 200,
                })
            },
            |t| crate::extract::extract_ranked(t, 0),
        )
        .await;

        assert_eq!(
            res.health(),
            SourceHealth::Failed(FailureReason::Extraction(ExtractError::InvalidLimit))
        );
    }
}
