use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::types::{FieldValue, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascend,
    Descend,
}

/// Column sort applied to leaf rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn ascend(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascend,
        }
    }

    pub fn descend(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descend,
        }
    }

    /// Orders two records by `field`. Rows missing the value go last in
    /// either direction.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match (a.get(&self.field), b.get(&self.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ord = compare_values(x, y);
                match self.order {
                    SortOrder::Ascend => ord,
                    SortOrder::Descend => ord.reverse(),
                }
            }
        }
    }

    /// Stable in-place sort.
    pub fn sort(&self, rows: &mut [Record]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}

fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.order {
            SortOrder::Ascend => "asc",
            SortOrder::Descend => "desc",
        };
        write!(f, "{}:{}", self.field, dir)
    }
}

/// Parses `field`, `field:asc` or `field:desc` (also `ascend`/`descend`).
impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = match s.split_once(':') {
            Some((f, d)) => (f.trim(), d.trim().to_ascii_lowercase()),
            None => (s.trim(), String::from("asc")),
        };
        if field.is_empty() {
            return Err(format!("missing sort field in '{s}'"));
        }
        let order = match dir.as_str() {
            "asc" | "ascend" => SortOrder::Ascend,
            "desc" | "descend" => SortOrder::Descend,
            other => return Err(format!("unknown sort order '{other}'")),
        };
        Ok(Self {
            field: field.to_string(),
            order,
        })
    }
}
