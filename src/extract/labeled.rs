// src/extract/labeled.rs
use regex::Regex;

use crate::error::ExtractError;
use crate::types::LabeledMetric;

/// First `<number> <label>` occurrence in document order, e.g. `"12,345 Followers"`.
///
/// Labels are matched case-sensitively, so pass every capitalization you want
/// to accept. `Ok(None)` is a normal outcome: many profile pages only render
/// the value from script.
pub fn extract_labeled_metric<S: AsRef<str>>(
    text: &str,
    subject: &str,
    label_variants: &[S],
) -> Result<Option<LabeledMetric>, ExtractError> {
    let alts: Vec<String> = label_variants
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !l.is_empty())
        .map(regex::escape)
        .collect();
    if alts.is_empty() {
        return Err(ExtractError::NoLabels);
    }

    let re = Regex::new(&format!(r"(\d+(?:,\d+)*)\s+({})", alts.join("|")))?;
    Ok(re.captures(text).map(|c| LabeledMetric {
        subject: subject.to_string(),
        value: c[1].to_string(),
        unit_label: c[2].to_string(),
    }))
}
