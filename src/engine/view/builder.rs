use chrono::{NaiveDateTime, Weekday};
use serde_json::{Map, Value as JsonValue, json};
use tracing::{debug, warn};

use crate::engine::aggregate::{AggregateResult, aggregate};
use crate::engine::chips::{Chip, to_chips};
use crate::engine::filter::apply_filters;
use crate::engine::group::{GroupKey, Grouping, group_by};
use crate::engine::schema::ReportSchema;
use crate::engine::state::ReportState;
use crate::engine::types::Record;
use crate::shared::config::CONFIG;
use crate::shared::datetime::TimeConfig;

use super::page::Page;
use super::sort::SortSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub page_size: usize,
    pub week_start: Weekday,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sort: None,
            page: 1,
            page_size: 10,
            week_start: Weekday::Sun,
        }
    }
}

impl ViewOptions {
    /// Page size and week start from the loaded configuration.
    pub fn from_config() -> Self {
        Self {
            page_size: CONFIG.report.page_size,
            week_start: TimeConfig::from_app_config().week_start,
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupHeader {
    pub key: GroupKey,
    pub label: String,
    pub aggregates: AggregateResult,
    pub rows: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupedRow {
    Leaf(Record),
    Header(GroupHeader),
}

impl GroupedRow {
    pub fn to_json(&self) -> JsonValue {
        match self {
            GroupedRow::Leaf(r) => r.to_json(),
            GroupedRow::Header(h) => {
                let key: Map<String, JsonValue> = h
                    .key
                    .fields()
                    .iter()
                    .zip(h.key.values())
                    .map(|(f, v)| (f.clone(), v.to_json()))
                    .collect();
                json!({
                    "group": key,
                    "label": h.label,
                    "aggregates": h.aggregates.to_json(),
                    "rows": h.rows.iter().map(Record::to_json).collect::<Vec<_>>(),
                })
            }
        }
    }
}

/// One computed page of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub rows: Vec<GroupedRow>,
    /// Dataset-wide summary; only present when ungrouped
    pub totals: Option<AggregateResult>,
    pub chips: Vec<Chip>,
    /// Top-level rows across all pages (groups when grouped)
    pub total_rows: usize,
    /// Records left after filtering
    pub matched_records: usize,
    pub page: Page,
}

impl ReportView {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "rows": self.rows.iter().map(GroupedRow::to_json).collect::<Vec<_>>(),
            "totals": self.totals.as_ref().map(AggregateResult::to_json),
            "chips": self.chips,
            "totalRows": self.total_rows,
            "matchedRecords": self.matched_records,
            "page": self.page,
        })
    }
}

/// Runs the whole pipeline for one state snapshot: presets are resolved
/// against `now`, then filter, group, aggregate, sort and paginate.
pub fn build_view(
    records: &[Record],
    state: &ReportState,
    schema: &ReportSchema,
    options: &ViewOptions,
    now: NaiveDateTime,
) -> ReportView {
    let filters = state.filters.resolve_presets(now, options.week_start);
    let filtered = apply_filters(records, &filters);
    let aggs = &state.aggregations;

    let (rows, totals) = match group_by(&filtered, &state.group_by) {
        Grouping::Passthrough(mut leaves) => {
            if let Some(sort) = &options.sort {
                sort.sort(&mut leaves);
            }
            let totals = if leaves.is_empty() || aggs.is_empty() {
                None
            } else {
                aggregate(&leaves, aggs).ok()
            };
            (leaves.into_iter().map(GroupedRow::Leaf).collect::<Vec<_>>(), totals)
        }
        Grouping::Groups(groups) => {
            let headers = groups
                .into_iter()
                .map(|mut g| {
                    if let Some(sort) = &options.sort {
                        sort.sort(&mut g.rows);
                    }
                    let aggregates = aggregate(&g.rows, aggs).unwrap_or_else(|e| {
                        warn!(target: "report_engine::view", "Group aggregation failed: {}", e);
                        AggregateResult::default()
                    });
                    GroupedRow::Header(GroupHeader {
                        label: g.key.label(),
                        key: g.key,
                        aggregates,
                        rows: g.rows,
                    })
                })
                .collect::<Vec<_>>();
            (headers, None)
        }
    };

    let total_rows = rows.len();
    let page = Page::new(options.page, options.page_size, total_rows);
    debug!(
        target: "report_engine::view",
        "Built view: {} matched, {} top-level rows, page {}/{}",
        filtered.len(),
        total_rows,
        page.number,
        page.total_pages
    );

    ReportView {
        rows: page.slice(rows),
        totals,
        chips: to_chips(state, schema),
        total_rows,
        matched_records: filtered.len(),
        page,
    }
}
