use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Number, Value as JsonValue};

use crate::engine::errors::RecordError;
use crate::engine::schema::{FieldKind, ReportSchema};

/// A single cell of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Text(s) => JsonValue::String(s.clone()),
            FieldValue::Number(n) => number_json(*n),
            FieldValue::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => f.write_str(&format_number(*n)),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// Renders whole numbers without a fractional part ("60", not "60.0").
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

pub fn number_json(n: f64) -> JsonValue {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        JsonValue::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

/// One immutable row of report data. Fields absent from `values` are simply
/// missing for this row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    values: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.get(field).and_then(FieldValue::as_date)
    }

    pub fn to_json(&self) -> JsonValue {
        let mut obj = Map::with_capacity(self.values.len() + 1);
        obj.insert("id".to_string(), JsonValue::String(self.id.clone()));
        for (k, v) in &self.values {
            obj.insert(k.clone(), v.to_json());
        }
        JsonValue::Object(obj)
    }

    /// Decodes one JSON object against `schema`. Keys outside the schema are
    /// ignored and `null` leaves the field missing.
    pub fn from_json(schema: &ReportSchema, value: &JsonValue) -> Result<Self, RecordError> {
        let obj = value.as_object().ok_or(RecordError::NotAnObject)?;
        let id = match obj.get("id") {
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let mut record = Record::new(id);
        for def in schema.fields() {
            let Some(raw) = obj.get(&def.name) else {
                continue;
            };
            if raw.is_null() {
                continue;
            }
            let parsed = match def.kind {
                FieldKind::Dimension => parse_text(raw),
                FieldKind::Measure => parse_number(raw),
                FieldKind::Date => parse_date(raw),
            }
            .map_err(|reason| RecordError::InvalidField {
                field: def.name.clone(),
                reason,
            })?;
            record.values.insert(def.name.clone(), parsed);
        }
        Ok(record)
    }

    /// Decodes a JSON array; rows without an id are numbered from 1.
    pub fn list_from_json(schema: &ReportSchema, value: &JsonValue) -> Result<Vec<Self>, RecordError> {
        let items = value.as_array().ok_or(RecordError::NotAnArray)?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut record = Record::from_json(schema, item)?;
                if record.id.is_empty() {
                    record.id = (i + 1).to_string();
                }
                Ok(record)
            })
            .collect()
    }
}

fn parse_text(raw: &JsonValue) -> Result<FieldValue, String> {
    match raw {
        JsonValue::String(s) => Ok(FieldValue::Text(s.clone())),
        JsonValue::Number(n) => Ok(FieldValue::Text(n.to_string())),
        JsonValue::Bool(b) => Ok(FieldValue::Text(b.to_string())),
        other => Err(format!("expected text, got {other}")),
    }
}

fn parse_number(raw: &JsonValue) -> Result<FieldValue, String> {
    match raw {
        JsonValue::Number(n) => n
            .as_f64()
            .map(FieldValue::Number)
            .ok_or_else(|| format!("unrepresentable number {n}")),
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map(FieldValue::Number)
            .map_err(|_| format!("expected number, got \"{s}\"")),
        other => Err(format!("expected number, got {other}")),
    }
}

fn parse_date(raw: &JsonValue) -> Result<FieldValue, String> {
    let JsonValue::String(s) = raw else {
        return Err(format!("expected date string, got {raw}"));
    };
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(FieldValue::Date(date));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(FieldValue::Date(dt.date_naive()));
    }
    Err(format!("unrecognized date \"{s}\""))
}

#[cfg(test)]
mod types_test;
