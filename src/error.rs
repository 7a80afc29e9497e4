// src/error.rs
//! Typed failure reasons. Nothing here is ever raised past the source runner;
//! these values end up inside `SourceResult::error`.

use serde::Serialize;
use thiserror::Error;

/// Why a single GET did not yield a body.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchError {
    #[error("timed out")]
    Timeout,

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("network error: {0}")]
    Network(String),

    /// Malformed URL or a zero timeout; no request was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Extractor-level faults. A pattern that simply matches nothing is NOT one of
/// these; that is an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExtractError {
    #[error("limit must be positive")]
    InvalidLimit,

    #[error("no label variants given")]
    NoLabels,

    #[error("bad pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for ExtractError {
    fn from(e: regex::Error) -> Self {
        ExtractError::Pattern(e.to_string())
    }
}

/// Terminal error of one source on one run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}
