// src/extract/ranked.rs
use once_cell::sync::Lazy;
use regex::Regex;

use super::check_limit;
use crate::error::ExtractError;
use crate::types::RankedRecord;

/// Start of a table row; each segment runs until the next one.
static RE_ROW_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<tr[\s>]").expect("row start regex"));

/// rank | linked name | total | signed change, with any markup in between
/// (newlines included).
static RE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<td[^>]*>\s*(\d+)\s*</td>.*?<a[^>]*>([^<]+)</a>.*?<td[^>]*>\s*([\d,]+)\s*</td>.*?<td[^>]*>\s*([+-]?[\d,]+)\s*</td>",
    )
    .expect("ranked row regex")
});

/// Extract up to `limit` ranked rows in document order.
///
/// Cells are returned as captured. Separators, signs and entity references
/// are kept; names only lose surrounding whitespace. A row missing any cell is
/// skipped. So is a row whose rank is zero or does not fit in `u32`.
pub fn extract_ranked(text: &str, limit: usize) -> Result<Vec<RankedRecord>, ExtractError> {
    check_limit(limit)?;

    let rows = trust_document_order(row_segments(text).filter_map(parse_row))
        .take(limit)
        .collect();
    Ok(rows)
}

/// Rank-order contract: pages list rows best-first, so document order is
/// taken as rank order. Never verified or re-sorted; a shuffled page yields
/// shuffled records.
fn trust_document_order<I: Iterator<Item = RankedRecord>>(rows: I) -> I {
    rows
}

fn row_segments(text: &str) -> impl Iterator<Item = &str> {
    let starts: Vec<usize> = RE_ROW_START.find_iter(text).map(|m| m.start()).collect();
    let ends: Vec<usize> = starts
        .iter()
        .skip(1)
        .copied()
        .chain(std::iter::once(text.len()))
        .collect();
    starts
        .into_iter()
        .zip(ends)
        .map(move |(s, e)| &text[s..e])
}

fn parse_row(segment: &str) -> Option<RankedRecord> {
    let caps = RE_ROW.captures(segment)?;
    let rank: u32 = caps[1].parse().ok().filter(|r| *r > 0)?;
    let name = caps[2].trim().to_string();
    if name.is_empty() {
        return None;
    }
    Some(RankedRecord {
        rank,
        name,
        metric_primary: caps[3].to_string(),
        metric_secondary: caps[4].to_string(),
    })
}
