use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::engine::errors::AggregateError;
use crate::engine::types::Record;

use super::ops::{AggValue, AggregatorImpl};
use super::spec::AggregationSpec;

/// Field -> finalized value, in the order operators were set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateResult {
    values: IndexMap<String, AggValue>,
}

impl AggregateResult {
    pub fn get(&self, field: &str) -> Option<&AggValue> {
        self.values.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AggValue)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

/// Computes every active operator of `spec` over `records`.
///
/// Fails with `EmptyInput` when an operator is active but there are no rows
/// to aggregate; callers never need a value for an empty group.
pub fn aggregate(records: &[Record], spec: &AggregationSpec) -> Result<AggregateResult, AggregateError> {
    let mut aggs: Vec<AggregatorImpl> = spec
        .active()
        .filter_map(|(field, op)| AggregatorImpl::from_op(field, op))
        .collect();

    if aggs.is_empty() {
        return Ok(AggregateResult::default());
    }
    if records.is_empty() {
        let err = AggregateError::EmptyInput {
            field: aggs[0].field().to_string(),
        };
        debug!(target: "report_engine::aggregate", "{}", err);
        return Err(err);
    }

    for record in records {
        for agg in aggs.iter_mut() {
            agg.update(record);
        }
    }

    let values = aggs
        .iter()
        .map(|a| (a.field().to_string(), a.finalize()))
        .collect();
    Ok(AggregateResult { values })
}
