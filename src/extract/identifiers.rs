// src/extract/identifiers.rs
use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::check_limit;
use crate::error::ExtractError;
use crate::types::MediaRecord;

/// Collect distinct values of `"<field>":"<token>"` pairs, capped at `limit`.
///
/// Duplicates are dropped before the cap is applied. Callers must treat the
/// order of the result as unspecified.
pub fn extract_identifiers(
    text: &str,
    field: &str,
    limit: usize,
) -> Result<Vec<String>, ExtractError> {
    check_limit(limit)?;
    if field.is_empty() {
        return Err(ExtractError::Pattern("empty field name".into()));
    }
    let re = Regex::new(&format!(r#""{}"\s*:\s*"([^"]+)""#, regex::escape(field)))?;

    let mut seen = HashSet::new();
    let ids = re
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .filter(|id| seen.insert(id.clone()))
        .take(limit)
        .collect();
    Ok(ids)
}

/// URL templates used to turn a bare identifier into a `MediaRecord`.
/// `{id}` is substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaTemplates {
    pub watch_url: String,
    pub thumbnail_url: String,
}

impl Default for MediaTemplates {
    fn default() -> Self {
        Self {
            watch_url: "https://www.youtube.com/watch?v={id}".into(),
            thumbnail_url: "https://img.youtube.com/vi/{id}/mqdefault.jpg".into(),
        }
    }
}

impl MediaTemplates {
    pub fn record(&self, id: &str) -> MediaRecord {
        MediaRecord {
            identifier: id.to_string(),
            url: self.watch_url.replace("{id}", id),
            thumbnail_url: self.thumbnail_url.replace("{id}", id),
        }
    }

    pub fn records<I, S>(&self, ids: I) -> Vec<MediaRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter().map(|id| self.record(id.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_set(v: Vec<String>) -> HashSet<String> {
        v.into_iter().collect()
    }

    #[test]
    fn dedup_happens_before_truncation() {
        let mut doc = String::new();
        for _ in 0..5 {
            doc.push_str(r#"{"videoId":"aaa"},"#);
        }
        doc.push_str(r#"{"videoId":"bbb"},{"videoId":"ccc"}"#);

        let out = extract_identifiers(&doc, "videoId", 10).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(as_set(out), as_set(vec!["aaa".into(), "bbb".into(), "ccc".into()]));
    }

    #[test]
    fn limit_is_an_upper_bound() {
        let doc = r#""videoId":"a" "videoId":"b" "videoId":"c" "videoId":"d""#;
        let out = extract_identifiers(doc, "videoId", 2).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|id| ["a", "b", "c", "d"].contains(&id.as_str())));
    }

    #[test]
    fn other_fields_are_ignored() {
        let doc = r#""playlistId":"p1","videoId":"v1","channelId":"c1""#;
        assert_eq!(extract_identifiers(doc, "videoId", 3).unwrap(), vec!["v1"]);
    }

    #[test]
    fn empty_field_and_zero_limit_are_faults() {
        assert!(extract_identifiers("", "", 3).is_err());
        assert_eq!(
            extract_identifiers("", "videoId", 0),
            Err(ExtractError::InvalidLimit)
        );
    }

    #[test]
    fn templates_fill_in_the_identifier() {
        let rec = MediaTemplates::default().record("abc123");
        assert_eq!(rec.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(
            rec.thumbnail_url,
            "https://img.youtube.com/vi/abc123/mqdefault.jpg"
        );
    }
}
