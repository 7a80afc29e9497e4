// src/types.rs
use serde::Serialize;

use crate::error::FailureReason;

/// One row of a ranked chart. Numbers stay exactly as captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRecord {
    pub rank: u32,
    pub name: String,
    pub metric_primary: String,   // e.g. total streams "1,234,567"
    pub metric_secondary: String, // e.g. daily change "+1,000"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRecord {
    pub identifier: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// A number tied to a subject, e.g. a follower count for a profile handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledMetric {
    pub subject: String,
    pub value: String,
    pub unit_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Ranked(RankedRecord),
    Media(MediaRecord),
    Metric(LabeledMetric),
}

impl From<RankedRecord> for Record {
    fn from(r: RankedRecord) -> Self {
        Record::Ranked(r)
    }
}

impl From<MediaRecord> for Record {
    fn from(r: MediaRecord) -> Self {
        Record::Media(r)
    }
}

impl From<LabeledMetric> for Record {
    fn from(r: LabeledMetric) -> Self {
        Record::Metric(r)
    }
}

/// Which extractor a source is wired to. Drives how an empty result is read:
/// a profile page with no label match usually means the value is only
/// rendered client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    RankedList,
    IdentifierList,
    LabeledMetric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceHealth {
    Working,
    Empty,
    RequiresDynamicRendering,
    Failed(FailureReason),
}

impl std::fmt::Display for SourceHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceHealth::Working => f.write_str("working"),
            SourceHealth::Empty => f.write_str("empty"),
            SourceHealth::RequiresDynamicRendering => f.write_str("requires dynamic rendering"),
            SourceHealth::Failed(r) => write!(f, "error: {r}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceResult {
    pub source_name: String,
    /// Report section; defaults to `source_name`.
    pub group: String,
    pub kind: SourceKind,
    pub records: Vec<Record>,
    pub error: Option<FailureReason>,
}

impl SourceResult {
    pub fn ok(name: impl Into<String>, kind: SourceKind, records: Vec<Record>) -> Self {
        let source_name = name.into();
        Self {
            group: source_name.clone(),
            source_name,
            kind,
            records,
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, kind: SourceKind, reason: FailureReason) -> Self {
        let source_name = name.into();
        Self {
            group: source_name.clone(),
            source_name,
            kind,
            records: Vec::new(),
            error: Some(reason),
        }
    }

    pub fn health(&self) -> SourceHealth {
        match (&self.error, self.records.is_empty(), self.kind) {
            (Some(r), _, _) => SourceHealth::Failed(r.clone()),
            (None, false, _) => SourceHealth::Working,
            (None, true, SourceKind::LabeledMetric) => SourceHealth::RequiresDynamicRendering,
            (None, true, _) => SourceHealth::Empty,
        }
    }

    /// Ranked rows carried by this result, in source order.
    pub fn ranked(&self) -> impl Iterator<Item = &RankedRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::Ranked(x) => Some(x),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn metric() -> Record {
        LabeledMetric {
            subject: "drake".into(),
            value: "1,000".into(),
            unit_label: "Followers".into(),
        }
        .into()
    }

    #[test]
    fn health_distinguishes_empty_dynamic_and_failed() {
        let ok = SourceResult::ok("ig", SourceKind::LabeledMetric, vec![metric()]);
        assert_eq!(ok.health(), SourceHealth::Working);

        let dynamic = SourceResult::ok("ig", SourceKind::LabeledMetric, vec![]);
        assert_eq!(dynamic.health(), SourceHealth::RequiresDynamicRendering);

        let empty = SourceResult::ok("yt", SourceKind::IdentifierList, vec![]);
        assert_eq!(empty.health(), SourceHealth::Empty);

        let failed = SourceResult::failed(
            "kworb",
            SourceKind::RankedList,
            FetchError::HttpStatus(404).into(),
        );
        assert!(failed.records.is_empty());
        assert_eq!(failed.health().to_string(), "error: HTTP 404");
    }
}
