use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Operator applied to a measure field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggOp {
    #[default]
    None,
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl AggOp {
    pub const ALL: [AggOp; 6] = [
        AggOp::None,
        AggOp::Sum,
        AggOp::Avg,
        AggOp::Min,
        AggOp::Max,
        AggOp::Count,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggOp::None => "none",
            AggOp::Sum => "sum",
            AggOp::Avg => "avg",
            AggOp::Min => "min",
            AggOp::Max => "max",
            AggOp::Count => "count",
        }
    }

    pub fn is_active(&self) -> bool {
        *self != AggOp::None
    }
}

impl fmt::Display for AggOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        AggOp::ALL
            .into_iter()
            .find(|op| op.as_str() == lower)
            .ok_or_else(|| format!("unknown aggregation operator '{s}'"))
    }
}

/// Measure field -> operator. `AggOp::None` is never stored; setting it
/// removes the entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, AggOp>", into = "IndexMap<String, AggOp>")]
pub struct AggregationSpec {
    ops: IndexMap<String, AggOp>,
}

impl AggregationSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, op: AggOp) -> Self {
        self.set(field, op);
        self
    }

    pub fn set(&mut self, field: &str, op: AggOp) {
        if op.is_active() {
            self.ops.insert(field.to_string(), op);
        } else {
            self.ops.shift_remove(field);
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<AggOp> {
        self.ops.shift_remove(field)
    }

    /// Operator for `field`, `AggOp::None` when unset.
    pub fn op(&self, field: &str) -> AggOp {
        self.ops.get(field).copied().unwrap_or_default()
    }

    pub fn active(&self) -> impl Iterator<Item = (&str, AggOp)> {
        self.ops.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, AggOp) -> bool) {
        self.ops.retain(|k, v| keep(k, *v));
    }
}

impl From<IndexMap<String, AggOp>> for AggregationSpec {
    fn from(raw: IndexMap<String, AggOp>) -> Self {
        let mut spec = Self::default();
        for (field, op) in raw {
            spec.set(&field, op);
        }
        spec
    }
}

impl From<AggregationSpec> for IndexMap<String, AggOp> {
    fn from(spec: AggregationSpec) -> Self {
        spec.ops
    }
}
