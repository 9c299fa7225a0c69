use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::engine::types::{FieldValue, Record, format_number};

/// One component of a composite group key. A record lacking the field gets
/// `Missing`, which is its own group and sorts first.
#[derive(Clone, Debug)]
pub enum GroupValue {
    Missing,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl GroupValue {
    pub fn from_field(value: Option<&FieldValue>) -> Self {
        match value {
            None => GroupValue::Missing,
            Some(FieldValue::Text(s)) => GroupValue::Text(s.clone()),
            Some(FieldValue::Number(n)) => GroupValue::Number(*n),
            Some(FieldValue::Date(d)) => GroupValue::Date(*d),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            GroupValue::Missing => 0,
            GroupValue::Number(_) => 1,
            GroupValue::Date(_) => 2,
            GroupValue::Text(_) => 3,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            GroupValue::Missing => serde_json::Value::Null,
            GroupValue::Text(s) => FieldValue::Text(s.clone()).to_json(),
            GroupValue::Number(n) => FieldValue::Number(*n).to_json(),
            GroupValue::Date(d) => FieldValue::Date(*d).to_json(),
        }
    }
}

impl PartialEq for GroupValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupValue {}

impl PartialOrd for GroupValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupValue::Missing, GroupValue::Missing) => Ordering::Equal,
            (GroupValue::Text(a), GroupValue::Text(b)) => a.cmp(b),
            (GroupValue::Number(a), GroupValue::Number(b)) => a.total_cmp(b),
            (GroupValue::Date(a), GroupValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Missing => f.write_str("(none)"),
            GroupValue::Text(s) => f.write_str(s),
            GroupValue::Number(n) => f.write_str(&format_number(*n)),
            GroupValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Composite key: one value per grouped field, in group-spec order.
/// Ordering is lexicographic over the components.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub(crate) fields: Vec<String>,
    pub(crate) values: Vec<GroupValue>,
}

impl GroupKey {
    pub fn from_record(record: &Record, group_by: &[String]) -> Self {
        let values = group_by
            .iter()
            .map(|name| GroupValue::from_field(record.get(name)))
            .collect();
        Self {
            fields: group_by.to_vec(),
            values,
        }
    }

    pub fn values(&self) -> &[GroupValue] {
        &self.values
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&GroupValue> {
        self.fields
            .iter()
            .position(|f| f == field)
            .map(|i| &self.values[i])
    }

    /// `"state: Texas · category: Home"`
    pub fn label(&self) -> String {
        self.fields
            .iter()
            .zip(&self.values)
            .map(|(f, v)| format!("{f}: {v}"))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}
