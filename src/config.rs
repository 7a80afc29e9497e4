// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::extract::MediaTemplates;

pub const DEFAULT_TOML_PATH: &str = "config/scout.toml";
pub const DEFAULT_JSON_PATH: &str = "config/scout.json";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub user_agent: String,
    /// Sent on every request in addition to `User-Agent`.
    pub extra_headers: BTreeMap<String, String>,
    pub chart: ChartConfig,
    pub videos: VideoConfig,
    pub social: SocialConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            extra_headers: BTreeMap::new(),
            chart: ChartConfig::default(),
            videos: VideoConfig::default(),
            social: SocialConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub name: String,
    pub url: String,
    pub limit: usize,
    pub timeout_secs: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            name: "Kworb (Spotify Charts)".into(),
            url: "https://kworb.net/spotify/artists.html".into(),
            limit: 20,
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub name: String,
    pub search_url: String,
    /// Query parameter the search term goes into.
    pub query_param: String,
    /// Appended to the artist name, e.g. "Artist official music video".
    pub query_suffix: String,
    pub field: String,
    /// How many of the top chart artists get a video search.
    pub top_artists: usize,
    pub limit: usize,
    pub timeout_secs: u64,
    pub templates: MediaTemplates,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            name: "YouTube Search".into(),
            search_url: "https://www.youtube.com/results".into(),
            query_param: "search_query".into(),
            query_suffix: "official music video".into(),
            field: "videoId".into(),
            top_artists: 3,
            limit: 3,
            timeout_secs: 15,
            templates: MediaTemplates::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub name: String,
    /// `{handle}` is substituted.
    pub profile_url: String,
    pub handles: Vec<String>,
    pub labels: Vec<String>,
    pub timeout_secs: u64,
    /// Profiles don't depend on each other, so they may be fetched together.
    pub concurrent: bool,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            name: "Instagram".into(),
            profile_url: "https://www.instagram.com/{handle}/".into(),
            handles: vec!["taylorswift".into(), "drake".into(), "billieeilish".into()],
            labels: vec!["Followers".into(), "followers".into()],
            timeout_secs: 10,
            concurrent: true,
        }
    }
}

pub fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

impl ScoutConfig {
    /// Load from an explicit path. TOML or JSON, picked by extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scout config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, &ext)
            .with_context(|| format!("parsing scout config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Fallback chain:
    /// 1) config/scout.toml
    /// 2) config/scout.json
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        Self::load_first_existing(&[PathBuf::from(DEFAULT_TOML_PATH), PathBuf::from(DEFAULT_JSON_PATH)])
    }

    pub fn load_first_existing(candidates: &[PathBuf]) -> Result<Self> {
        match candidates.iter().find(|p| p.exists()) {
            Some(p) => Self::load_from(p),
            None => Ok(Self::default()),
        }
    }

    /// Clamp values the extractors and fetcher would reject.
    fn sanitized(mut self) -> Self {
        let d = ScoutConfig::default();
        if self.user_agent.trim().is_empty() {
            self.user_agent = d.user_agent;
        }
        if self.chart.limit == 0 {
            self.chart.limit = d.chart.limit;
        }
        if self.videos.limit == 0 {
            self.videos.limit = d.videos.limit;
        }
        for t in [
            &mut self.chart.timeout_secs,
            &mut self.videos.timeout_secs,
            &mut self.social.timeout_secs,
        ] {
            if *t == 0 {
                *t = 10;
            }
        }
        self.social.handles = clean_list(std::mem::take(&mut self.social.handles));
        self
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<ScoutConfig> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        _ => toml::from_str(s)
            .or_else(|_| serde_json::from_str(s))
            .map_err(|_| anyhow!("unsupported scout config format")),
    }
}

/// Trim, drop empties and duplicates, keep first-seen order.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|x| x == t) {
            out.push(t.to_string());
        }
    }
    out
}
