use tracing::debug;

use crate::engine::types::Record;

use super::spec::FilterSpec;

/// Keeps records satisfying every constraint in `spec`, in their original
/// order. An empty spec returns the input as is.
pub fn apply_filters(records: &[Record], spec: &FilterSpec) -> Vec<Record> {
    if spec.is_empty() {
        return records.to_vec();
    }

    let kept: Vec<Record> = records
        .iter()
        .filter(|r| matches_all(r, spec))
        .cloned()
        .collect();

    debug!(
        target: "report_engine::filter",
        "Filtered {} records down to {} using {} constraints",
        records.len(),
        kept.len(),
        spec.len()
    );
    kept
}

pub fn matches_all(record: &Record, spec: &FilterSpec) -> bool {
    spec.iter()
        .all(|(field, filter)| filter.matches(record.get(field)))
}
