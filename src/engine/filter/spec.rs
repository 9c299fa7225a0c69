use chrono::{DateTime, NaiveDate, NaiveDateTime, Weekday};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::types::FieldValue;
use crate::shared::datetime::preset::{DatePreset, end_of_day, resolve_preset, start_of_day};

use super::predicate::{in_date_range, in_numeric_range, matches_categorical};

/// Inclusive numeric bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumberRange {
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

/// Date bounds for the schema's date field.
///
/// A preset and manual bounds are mutually exclusive: choosing a preset
/// overwrites start/end with its resolution, and any manual edit afterwards
/// drops the preset tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DateRange {
    #[serde(default, deserialize_with = "lenient_start")]
    start: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_end")]
    end: Option<NaiveDateTime>,
    #[serde(default)]
    no_end: bool,
    #[serde(default)]
    preset: Option<DatePreset>,
}

impl DateRange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole days from `start` through `end`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new().with_start(Some(start)).with_end(Some(end))
    }

    pub fn from_preset(preset: DatePreset, now: NaiveDateTime, week_start: Weekday) -> Self {
        let resolved = resolve_preset(preset, now, week_start);
        Self {
            start: resolved.start,
            end: resolved.end,
            no_end: resolved.no_end,
            preset: Some(preset),
        }
    }

    pub fn with_start(mut self, start: Option<NaiveDate>) -> Self {
        self.start = start.map(start_of_day);
        self.preset = None;
        self
    }

    pub fn with_end(mut self, end: Option<NaiveDate>) -> Self {
        self.end = end.map(end_of_day);
        self.preset = None;
        self
    }

    pub fn with_no_end(mut self, no_end: bool) -> Self {
        self.no_end = no_end;
        self.preset = None;
        self
    }

    /// Re-resolves a preset-tagged range against `now`; manual ranges are
    /// returned unchanged.
    pub fn refreshed(&self, now: NaiveDateTime, week_start: Weekday) -> Self {
        match self.preset {
            Some(p) => Self::from_preset(p, now, week_start),
            None => *self,
        }
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    /// Upper bound as entered; ignored by matching when `no_end` is set.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn no_end(&self) -> bool {
        self.no_end
    }

    pub fn preset(&self) -> Option<DatePreset> {
        self.preset
    }

    pub fn is_active(&self) -> bool {
        self.preset.is_some() || self.start.is_some() || self.end.is_some() || self.no_end
    }

    /// True when the range actually excludes some dates.
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || (!self.no_end && self.end.is_some())
    }
}

fn lenient_start<'de, D>(d: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_bound(d, start_of_day)
}

fn lenient_end<'de, D>(d: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_bound(d, end_of_day)
}

/// Accepts a naive timestamp, RFC 3339 or a plain `YYYY-MM-DD`. A plain day
/// is widened with `day_edge`.
fn lenient_bound<'de, D>(
    d: D,
    day_edge: fn(NaiveDate) -> NaiveDateTime,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(d)?;
    raw.map(|s| {
        parse_bound(&s, day_edge).ok_or_else(|| D::Error::custom(format!("invalid date '{s}'")))
    })
    .transpose()
}

fn parse_bound(
    raw: &str,
    day_edge: fn(NaiveDate) -> NaiveDateTime,
) -> Option<NaiveDateTime> {
    let s = raw.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(day_edge)
        })
}

/// Predicate descriptor for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldFilter {
    /// Allowed values of a dimension
    Values(Vec<String>),
    /// Bounds on a measure
    Number(NumberRange),
    /// Bounds on the date field
    Date(DateRange),
}

impl FieldFilter {
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldFilter::Values(values.into_iter().map(Into::into).collect())
    }

    /// Whether this descriptor carries any constraint worth keeping.
    pub fn is_active(&self) -> bool {
        match self {
            FieldFilter::Values(v) => !v.is_empty(),
            FieldFilter::Number(r) => r.is_active(),
            FieldFilter::Date(r) => r.is_active(),
        }
    }

    /// Whether the descriptor can reject anything.
    pub fn constrains(&self) -> bool {
        match self {
            FieldFilter::Values(v) => !v.is_empty(),
            FieldFilter::Number(r) => r.is_active(),
            FieldFilter::Date(r) => r.is_bounded(),
        }
    }

    /// Tests one record value. Missing or wrongly-typed values never match a
    /// constraining filter.
    pub fn matches(&self, value: Option<&FieldValue>) -> bool {
        if !self.constrains() {
            return true;
        }
        match (self, value) {
            (FieldFilter::Values(allowed), Some(FieldValue::Text(s))) => {
                matches_categorical(s, Some(allowed.as_slice()))
            }
            (FieldFilter::Number(range), Some(FieldValue::Number(n))) => {
                in_numeric_range(*n, Some(range))
            }
            (FieldFilter::Date(range), Some(FieldValue::Date(d))) => in_date_range(*d, Some(range)),
            _ => false,
        }
    }
}

/// Active column filters keyed by field name, in the order they were set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    fields: IndexMap<String, FieldFilter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, filter: FieldFilter) -> Self {
        self.set(field, Some(filter));
        self
    }

    /// Sets or clears one field's constraint. Inactive descriptors (an empty
    /// value list, a range with no bounds) are stored as absence.
    pub fn set(&mut self, field: &str, filter: Option<FieldFilter>) {
        match filter {
            Some(f) if f.is_active() => {
                self.fields.insert(field.to_string(), f);
            }
            _ => {
                self.fields.shift_remove(field);
            }
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldFilter> {
        self.fields.shift_remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldFilter> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldFilter)> {
        self.fields.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Copy with every preset-tagged date range re-resolved against `now`.
    pub fn resolve_presets(&self, now: NaiveDateTime, week_start: Weekday) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|(k, f)| {
                let f = match f {
                    FieldFilter::Date(r) => FieldFilter::Date(r.refreshed(now, week_start)),
                    other => other.clone(),
                };
                (k.clone(), f)
            })
            .collect();
        Self { fields }
    }

    /// Drops entries for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &FieldFilter) -> bool) {
        self.fields.retain(|k, f| keep(k, f));
    }
}
