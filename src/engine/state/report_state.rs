use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::aggregate::AggregationSpec;
use crate::engine::filter::{FieldFilter, FilterSpec};
use crate::engine::group::GroupSpec;
use crate::engine::schema::{FieldKind, ReportSchema};

/// Everything a report view is computed from. Holds no record data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportState {
    pub filters: FilterSpec,
    pub group_by: GroupSpec,
    pub aggregations: AggregationSpec,
}

impl ReportState {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.group_by.is_empty() && self.aggregations.is_empty()
    }

    /// Parses a persisted blob. Anything unreadable yields the empty state.
    pub fn from_json_str(raw: &str) -> Self {
        match serde_json::from_str::<ReportState>(raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    target: "report_engine::state",
                    "Failed to read persisted report state, starting empty: {}", e
                );
                Self::default()
            }
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Drops entries that do not fit `schema`: unknown fields, filters of the
    /// wrong kind, non-groupable group fields and aggregations on
    /// non-measures.
    pub fn sanitize(mut self, schema: &ReportSchema) -> Self {
        let before = (
            self.filters.len(),
            self.group_by.len(),
            self.aggregations.len(),
        );

        self.filters
            .retain(|field, filter| filter_fits(schema.kind_of(field), filter));
        self.group_by
            .retain(|field| schema.kind_of(field).is_some_and(|k| k.is_groupable()));
        self.aggregations
            .retain(|field, _| schema.kind_of(field) == Some(FieldKind::Measure));

        let after = (
            self.filters.len(),
            self.group_by.len(),
            self.aggregations.len(),
        );
        if before != after {
            debug!(
                target: "report_engine::state",
                "Dropped state entries not in schema: before={:?} after={:?}", before, after
            );
        }
        self
    }
}

pub(crate) fn filter_fits(kind: Option<FieldKind>, filter: &FieldFilter) -> bool {
    matches!(
        (kind, filter),
        (Some(FieldKind::Dimension), FieldFilter::Values(_))
            | (Some(FieldKind::Measure), FieldFilter::Number(_))
            | (Some(FieldKind::Date), FieldFilter::Date(_))
    )
}
