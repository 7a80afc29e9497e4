// src/report.rs
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Record, SourceHealth, SourceResult};

const RULE_WIDTH: usize = 60;

/// Everything one run produced, in the order the sources ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub results: Vec<SourceResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub working: usize,
    pub empty: usize,
    pub dynamic: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn tally(&self) -> Tally {
        let mut t = Tally::default();
        for r in &self.results {
            match r.health() {
                SourceHealth::Working => t.working += 1,
                SourceHealth::Empty => t.empty += 1,
                SourceHealth::RequiresDynamicRendering => t.dynamic += 1,
                SourceHealth::Failed(_) => t.failed += 1,
            }
        }
        t
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}\n{title}\n{rule}")
}

/// Human-readable report: a banner per section, one line per record, then
/// the health of every source.
pub fn render<W: Write>(report: &RunReport, out: &mut W) -> io::Result<()> {
    banner(out, "SOUND SCOUT DATA SOURCE VERIFICATION")?;
    writeln!(out, "Timestamp: {}", report.started_at.to_rfc3339())?;

    let mut current_group: Option<&str> = None;
    for r in &report.results {
        if current_group != Some(r.group.as_str()) {
            banner(out, &r.group.to_uppercase())?;
            current_group = Some(r.group.as_str());
        }
        if r.source_name != r.group {
            writeln!(out, "\n{}", r.source_name)?;
        }
        render_source(r, out)?;
    }

    banner(out, "SUMMARY")?;
    for r in &report.results {
        match r.health() {
            SourceHealth::Working => {
                writeln!(out, "  {} - working ({} records)", r.source_name, r.records.len())?
            }
            h => writeln!(out, "  {} - {}", r.source_name, h)?,
        }
    }
    let t = report.tally();
    writeln!(
        out,
        "\nSources: {} working, {} empty, {} requires dynamic rendering, {} failed",
        t.working, t.empty, t.dynamic, t.failed
    )
}

fn render_source<W: Write>(r: &SourceResult, out: &mut W) -> io::Result<()> {
    match r.health() {
        SourceHealth::Failed(reason) => return writeln!(out, "  Error: {reason}"),
        SourceHealth::Empty => return writeln!(out, "  No records matched"),
        SourceHealth::RequiresDynamicRendering => {
            return writeln!(out, "  Page loaded (value in dynamic content)")
        }
        SourceHealth::Working => {}
    }
    for rec in &r.records {
        writeln!(out, "{}", record_line(rec))?;
    }
    Ok(())
}

pub fn record_line(rec: &Record) -> String {
    match rec {
        Record::Ranked(x) => {
            let name: String = x.name.chars().take(30).collect();
            format!(
                "  #{:>3} | {:<30} | Streams: {:>15} | Daily: {}",
                x.rank, name, x.metric_primary, x.metric_secondary
            )
        }
        Record::Media(x) => format!("  - Video: {}", x.url),
        Record::Metric(x) => format!("  {} {}", x.value, x.unit_label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RankedRecord, SourceKind};

    #[test]
    fn ranked_line_pads_and_truncates() {
        let rec = Record::Ranked(RankedRecord {
            rank: 1,
            name: "An Artist With A Very Long Name Indeed".into(),
            metric_primary: "1,234".into(),
            metric_secondary: "-5".into(),
        });
        let line = record_line(&rec);
        assert!(line.starts_with("  #  1 | An Artist With A Very Long Nam |"));
        assert!(line.ends_with("Daily: -5"));
    }

    #[test]
    fn tally_counts_each_health() {
        let report = RunReport {
            started_at: Utc::now(),
            results: vec![
                SourceResult::ok("a", SourceKind::RankedList, vec![]),
                SourceResult::ok("b", SourceKind::LabeledMetric, vec![]),
                SourceResult::failed(
                    "c",
                    SourceKind::IdentifierList,
                    crate::error::FetchError::Timeout.into(),
                ),
            ],
        };
        assert_eq!(
            report.tally(),
            Tally {
                working: 0,
                empty: 1,
                dynamic: 1,
                failed: 1
            }
        );
    }
}
