// src/telemetry.rs
use anyhow::Context;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Process-wide Prometheus recorder for the harvest counters.
///
/// Installed once per process. The binary renders the exposition text after
/// the run; tests scrape it the same way.
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        Ok(Self { handle })
    }

    /// Current series in the Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}
