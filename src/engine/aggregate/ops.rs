use std::fmt;

use serde::{Serialize, Serializer};

use crate::engine::types::{Record, format_number, number_json};

use super::spec::AggOp;

/// Finalized value of one aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum AggValue {
    Number(f64),
    Count(u64),
    /// The group had rows but none carried a numeric value for the field
    Missing,
}

impl AggValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AggValue::Number(n) => Some(*n),
            AggValue::Count(c) => Some(*c as f64),
            AggValue::Missing => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AggValue::Number(n) => number_json(*n),
            AggValue::Count(c) => serde_json::Value::from(*c),
            AggValue::Missing => serde_json::Value::Null,
        }
    }
}

impl Serialize for AggValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for AggValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggValue::Number(n) if n.fract() != 0.0 => write!(f, "{:.2}", n),
            AggValue::Number(n) => f.write_str(&format_number(*n)),
            AggValue::Count(c) => write!(f, "{c}"),
            AggValue::Missing => f.write_str("–"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sum {
    pub field: String,
    pub sum: f64,
    pub seen: u64,
}

impl Sum {
    pub fn new(field: String) -> Self {
        Self {
            field,
            ..Default::default()
        }
    }

    pub fn update(&mut self, value: f64) {
        self.sum += value;
        self.seen += 1;
    }

    pub fn finalize(&self) -> AggValue {
        if self.seen == 0 {
            AggValue::Missing
        } else {
            AggValue::Number(self.sum)
        }
    }
}

/// Mean over every row of the group; rows lacking a value add nothing to
/// the sum but still count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Avg {
    pub field: String,
    pub sum: f64,
    pub seen: u64,
    pub rows: u64,
}

impl Avg {
    pub fn new(field: String) -> Self {
        Self {
            field,
            ..Default::default()
        }
    }

    pub fn update(&mut self, value: Option<f64>) {
        self.rows += 1;
        if let Some(v) = value {
            self.sum += v;
            self.seen += 1;
        }
    }

    pub fn finalize(&self) -> AggValue {
        if self.seen == 0 {
            AggValue::Missing
        } else {
            AggValue::Number(self.sum / self.rows as f64)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Min {
    pub field: String,
    pub min: Option<f64>,
}

impl Min {
    pub fn new(field: String) -> Self {
        Self { field, min: None }
    }

    pub fn update(&mut self, value: f64) {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
    }

    pub fn finalize(&self) -> AggValue {
        self.min.map_or(AggValue::Missing, AggValue::Number)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Max {
    pub field: String,
    pub max: Option<f64>,
}

impl Max {
    pub fn new(field: String) -> Self {
        Self { field, max: None }
    }

    pub fn update(&mut self, value: f64) {
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn finalize(&self) -> AggValue {
        self.max.map_or(AggValue::Missing, AggValue::Number)
    }
}

/// Row count; the field's values are not inspected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Count {
    pub field: String,
    pub count: u64,
}

impl Count {
    pub fn new(field: String) -> Self {
        Self { field, count: 0 }
    }

    pub fn update(&mut self) {
        self.count += 1;
    }

    pub fn finalize(&self) -> AggValue {
        AggValue::Count(self.count)
    }
}

/// Accumulator with concrete implementations per operator
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatorImpl {
    Sum(Sum),
    Avg(Avg),
    Min(Min),
    Max(Max),
    Count(Count),
}

impl AggregatorImpl {
    /// `None` for `AggOp::None`, which produces no output.
    pub fn from_op(field: &str, op: AggOp) -> Option<Self> {
        let field = field.to_string();
        Some(match op {
            AggOp::None => return None,
            AggOp::Sum => Self::Sum(Sum::new(field)),
            AggOp::Avg => Self::Avg(Avg::new(field)),
            AggOp::Min => Self::Min(Min::new(field)),
            AggOp::Max => Self::Max(Max::new(field)),
            AggOp::Count => Self::Count(Count::new(field)),
        })
    }

    pub fn field(&self) -> &str {
        match self {
            AggregatorImpl::Sum(a) => &a.field,
            AggregatorImpl::Avg(a) => &a.field,
            AggregatorImpl::Min(a) => &a.field,
            AggregatorImpl::Max(a) => &a.field,
            AggregatorImpl::Count(a) => &a.field,
        }
    }

    /// Feeds one row. Non-numeric or missing values are skipped by sum, min
    /// and max; avg still counts the row.
    pub fn update(&mut self, record: &Record) {
        let value = record.number(self.field());
        match self {
            AggregatorImpl::Count(a) => a.update(),
            AggregatorImpl::Avg(a) => a.update(value),
            AggregatorImpl::Sum(a) => value.into_iter().for_each(|v| a.update(v)),
            AggregatorImpl::Min(a) => value.into_iter().for_each(|v| a.update(v)),
            AggregatorImpl::Max(a) => value.into_iter().for_each(|v| a.update(v)),
        }
    }

    pub fn finalize(&self) -> AggValue {
        match self {
            AggregatorImpl::Sum(a) => a.finalize(),
            AggregatorImpl::Avg(a) => a.finalize(),
            AggregatorImpl::Min(a) => a.finalize(),
            AggregatorImpl::Max(a) => a.finalize(),
            AggregatorImpl::Count(a) => a.finalize(),
        }
    }
}
