use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::engine::filter::{DateRange, FieldFilter, NumberRange};
use crate::engine::schema::ReportSchema;
use crate::engine::state::ReportState;
use crate::engine::types::format_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipKind {
    Filter,
    Group,
    Agg,
}

/// One removable summary item of the active report state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub kind: ChipKind,
    /// Field the chip refers to
    pub key: String,
    pub label: String,
    pub value: String,
}

impl Chip {
    /// Compact text used on saved-report cards: `"state: CA, TX"`,
    /// `"Grouping: state"`, `"orders=sum"`.
    pub fn tag(&self) -> String {
        match self.kind {
            ChipKind::Filter => format!("{}: {}", self.key, self.value),
            ChipKind::Group => format!("{}: {}", self.label, self.value),
            ChipKind::Agg => self.value.clone(),
        }
    }
}

/// Projects `state` into chips: filters in schema order, then one chip per
/// grouped field, then one per active aggregation.
pub fn to_chips(state: &ReportState, schema: &ReportSchema) -> Vec<Chip> {
    let mut chips = Vec::new();

    let mut filters: Vec<(&String, &FieldFilter)> = state.filters.iter().collect();
    filters.sort_by_key(|(field, _)| schema.position(field).unwrap_or(usize::MAX));
    for (field, filter) in filters {
        if let Some(value) = filter_value(filter) {
            chips.push(Chip {
                kind: ChipKind::Filter,
                key: field.clone(),
                label: schema.label(field).to_string(),
                value,
            });
        }
    }

    for field in state.group_by.iter() {
        chips.push(Chip {
            kind: ChipKind::Group,
            key: field.clone(),
            label: "Grouping".to_string(),
            value: field.clone(),
        });
    }

    for (field, op) in state.aggregations.active() {
        chips.push(Chip {
            kind: ChipKind::Agg,
            key: field.to_string(),
            label: "Aggregations".to_string(),
            value: format!("{field}={op}"),
        });
    }

    chips
}

/// Returns `state` with exactly the setting behind `chip` cleared.
pub fn remove_chip(state: &ReportState, chip: &Chip) -> ReportState {
    let mut next = state.clone();
    match chip.kind {
        ChipKind::Filter => {
            next.filters.remove(&chip.key);
        }
        ChipKind::Group => {
            next.group_by.remove(&chip.key);
        }
        ChipKind::Agg => {
            next.aggregations.remove(&chip.key);
        }
    }
    next
}

fn filter_value(filter: &FieldFilter) -> Option<String> {
    match filter {
        FieldFilter::Values(v) if v.is_empty() => None,
        FieldFilter::Values(v) => Some(v.join(", ")),
        FieldFilter::Number(r) if !r.is_active() => None,
        FieldFilter::Number(r) => Some(number_value(r)),
        FieldFilter::Date(r) if !r.is_active() => None,
        FieldFilter::Date(r) => Some(date_value(r)),
    }
}

fn number_value(range: &NumberRange) -> String {
    let bound = |b: Option<f64>| b.map(format_number).unwrap_or_else(|| "–".to_string());
    format!("{} to {}", bound(range.min), bound(range.max))
}

fn date_value(range: &DateRange) -> String {
    if let Some(preset) = range.preset() {
        return preset.label().to_string();
    }
    let day = |d: Option<NaiveDateTime>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "—".to_string())
    };
    let end = if range.no_end() {
        "No end".to_string()
    } else {
        day(range.end())
    };
    format!("{} → {}", day(range.start()), end)
}
