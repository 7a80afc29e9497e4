// src/harvest.rs
use std::time::Duration;

use futures::future::join_all;
use reqwest::Url;

use crate::config::{secs, ScoutConfig};
use crate::extract::{extract_identifiers, extract_labeled_metric, extract_ranked, MediaTemplates};
use crate::fetch::Fetcher;
use crate::report::RunReport;
use crate::runner;
use crate::types::{SourceKind, SourceResult};

/// Which extractor a source uses, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Ranked {
        limit: usize,
    },
    Identifiers {
        field: String,
        limit: usize,
        templates: MediaTemplates,
    },
    Labeled {
        subject: String,
        labels: Vec<String>,
    },
}

impl Extraction {
    pub fn kind(&self) -> SourceKind {
        match self {
            Extraction::Ranked { .. } => SourceKind::RankedList,
            Extraction::Identifiers { .. } => SourceKind::IdentifierList,
            Extraction::Labeled { .. } => SourceKind::LabeledMetric,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub name: String,
    /// Report section this source is listed under.
    pub group: String,
    pub url: String,
    pub timeout: Duration,
    pub extraction: Extraction,
}

/// Per-artist video search, parametrized by names found upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSearch {
    pub group: String,
    pub search_url: String,
    pub query_param: String,
    pub query_suffix: String,
    pub field: String,
    pub limit: usize,
    pub timeout: Duration,
    pub templates: MediaTemplates,
}

impl VideoSearch {
    pub fn descriptor_for(&self, artist: &str) -> SourceDescriptor {
        let query = format!("{} {}", artist, self.query_suffix).trim().to_string();
        // An unparsable base is left as-is; the fetcher reports it.
        let params = [(self.query_param.as_str(), query.as_str())];
        let url = Url::parse_with_params(&self.search_url, &params)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| self.search_url.clone());
        SourceDescriptor {
            name: format!("{}: {}", self.group, artist),
            group: self.group.clone(),
            url,
            timeout: self.timeout,
            extraction: Extraction::Identifiers {
                field: self.field.clone(),
                limit: self.limit,
                templates: self.templates.clone(),
            },
        }
    }
}

/// One step of a run. Stages execute strictly in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Source(SourceDescriptor),
    /// Independent sources, fetched together, reported in declaration order.
    Concurrent(Vec<SourceDescriptor>),
    /// One search per name among the first `top` ranked records of `upstream`.
    ForEachRanked {
        upstream: String,
        top: usize,
        search: VideoSearch,
    },
}

pub struct Harvester<F> {
    fetcher: F,
}

impl<F: Fetcher> Harvester<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub async fn run_source(&self, d: &SourceDescriptor) -> SourceResult {
        let kind = d.extraction.kind();
        let fetch = self.fetcher.fetch(&d.url, d.timeout);
        let mut result = match &d.extraction {
            Extraction::Ranked { limit } => {
                runner::run_source(&d.name, kind, fetch, |t| extract_ranked(t, *limit)).await
            }
            Extraction::Identifiers {
                field,
                limit,
                templates,
            } => {
                runner::run_source(&d.name, kind, fetch, |t| {
                    extract_identifiers(t, field, *limit).map(|ids| templates.records(ids))
                })
                .await
            }
            Extraction::Labeled { subject, labels } => {
                runner::run_source(&d.name, kind, fetch, |t| {
                    extract_labeled_metric(t, subject, labels.as_slice())
                        .map(|m| m.into_iter().collect::<Vec<_>>())
                })
                .await
            }
        };
        result.group = d.group.clone();
        result
    }

    /// Drive every stage and collect the results of this run.
    pub async fn run_all(&self, stages: &[Stage]) -> RunReport {
        let started_at = chrono::Utc::now();
        let mut results: Vec<SourceResult> = Vec::new();

        for stage in stages {
            match stage {
                Stage::Source(d) => results.push(self.run_source(d).await),
                Stage::Concurrent(ds) => {
                    let batch = join_all(ds.iter().map(|d| self.run_source(d))).await;
                    results.extend(batch);
                }
                Stage::ForEachRanked {
                    upstream,
                    top,
                    search,
                } => {
                    let names = top_names(&results, upstream, *top);
                    if names.is_empty() {
                        tracing::info!(
                            upstream = %upstream,
                            "no upstream records; dependent searches skipped"
                        );
                        continue;
                    }
                    for name in names {
                        let d = search.descriptor_for(&name);
                        results.push(self.run_source(&d).await);
                    }
                }
            }
        }

        RunReport {
            started_at,
            results,
        }
    }
}

fn top_names(results: &[SourceResult], upstream: &str, top: usize) -> Vec<String> {
    results
        .iter()
        .find(|r| r.source_name == upstream)
        .map(|r| r.ranked().take(top).map(|x| x.name.clone()).collect())
        .unwrap_or_default()
}

/// Chart first, then videos for its top artists, then social profiles.
pub fn plan_from_config(cfg: &ScoutConfig) -> Vec<Stage> {
    let chart = SourceDescriptor {
        name: cfg.chart.name.clone(),
        group: cfg.chart.name.clone(),
        url: cfg.chart.url.clone(),
        timeout: secs(cfg.chart.timeout_secs),
        extraction: Extraction::Ranked {
            limit: cfg.chart.limit,
        },
    };

    let v = &cfg.videos;
    let videos = Stage::ForEachRanked {
        upstream: chart.name.clone(),
        top: v.top_artists,
        search: VideoSearch {
            group: v.name.clone(),
            search_url: v.search_url.clone(),
            query_param: v.query_param.clone(),
            query_suffix: v.query_suffix.clone(),
            field: v.field.clone(),
            limit: v.limit,
            timeout: secs(v.timeout_secs),
            templates: v.templates.clone(),
        },
    };

    let s = &cfg.social;
    let profiles: Vec<SourceDescriptor> = s
        .handles
        .iter()
        .map(|h| SourceDescriptor {
            name: format!("{}: @{}", s.name, h),
            group: s.name.clone(),
            url: s.profile_url.replace("{handle}", h),
            timeout: secs(s.timeout_secs),
            extraction: Extraction::Labeled {
                subject: h.clone(),
                labels: s.labels.clone(),
            },
        })
        .collect();

    let mut plan = vec![Stage::Source(chart), videos];
    if s.concurrent {
        plan.push(Stage::Concurrent(profiles));
    } else {
        plan.extend(profiles.into_iter().map(Stage::Source));
    }
    plan
}
