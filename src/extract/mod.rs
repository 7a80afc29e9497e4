// src/extract/mod.rs
//! Pattern-based extraction over semi-structured markup.
//!
//! Every extractor here is best-effort: upstream format drift shows up as an
//! empty result, never as a panic. An `Err` means the extractor could not even
//! be applied (bad limit, bad pattern), which the runner reports as a source
//! failure.

pub mod identifiers;
pub mod labeled;
pub mod ranked;

pub use identifiers::{extract_identifiers, MediaTemplates};
pub use labeled::extract_labeled_metric;
pub use ranked::extract_ranked;

use crate::error::ExtractError;

pub(crate) fn check_limit(limit: usize) -> Result<(), ExtractError> {
    if limit == 0 {
        return Err(ExtractError::InvalidLimit);
    }
    Ok(())
}
