use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::engine::aggregate::AggOp;
use crate::engine::chips::{self, Chip};
use crate::engine::errors::StateError;
use crate::engine::filter::FieldFilter;
use crate::engine::group::GroupSpec;
use crate::engine::schema::{FieldKind, ReportSchema};
use crate::engine::types::Record;
use crate::engine::view::{ReportView, ViewOptions, build_view};

use super::report_state::{ReportState, filter_fits};

/// Single owner of a report's state. Every named operation validates against
/// the schema and publishes a fresh immutable snapshot.
#[derive(Debug)]
pub struct ReportStore {
    schema: Arc<ReportSchema>,
    tx: watch::Sender<Arc<ReportState>>,
}

impl ReportStore {
    pub fn new(schema: Arc<ReportSchema>) -> Self {
        Self::with_state(schema, ReportState::default())
    }

    /// Starts from a restored state; entries that do not fit are dropped.
    pub fn with_state(schema: Arc<ReportSchema>, state: ReportState) -> Self {
        let state = state.sanitize(&schema);
        let (tx, _rx) = watch::channel(Arc::new(state));
        Self { schema, tx }
    }

    pub fn schema(&self) -> &Arc<ReportSchema> {
        &self.schema
    }

    pub fn snapshot(&self) -> Arc<ReportState> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ReportState>> {
        self.tx.subscribe()
    }

    /// Sets or clears the filter on `field`. The descriptor must match the
    /// field's kind.
    pub fn set_filter(&self, field: &str, filter: Option<FieldFilter>) -> Result<(), StateError> {
        let kind = self.require_field(field)?;
        if let Some(f) = &filter {
            if !filter_fits(Some(kind), f) {
                return Err(self.reject(StateError::FilterKindMismatch(field.to_string())));
            }
        }
        self.update("set_filter", |s| s.filters.set(field, filter));
        Ok(())
    }

    /// Replaces the grouping wholesale.
    pub fn set_group_by(&self, fields: &[&str]) -> Result<(), StateError> {
        let mut spec = GroupSpec::default();
        for field in fields {
            self.require_groupable(field)?;
            if !spec.push(*field) {
                return Err(self.reject(StateError::DuplicateGroupField(field.to_string())));
            }
        }
        self.update("set_group_by", |s| s.group_by = spec);
        Ok(())
    }

    /// Adds `field` to the grouping or removes it; returns whether it is
    /// grouped afterwards.
    pub fn toggle_group_field(&self, field: &str) -> Result<bool, StateError> {
        self.require_groupable(field)?;
        let mut grouped = false;
        self.update("toggle_group_field", |s| {
            grouped = s.group_by.push(field);
            if !grouped {
                s.group_by.remove(field);
            }
        });
        Ok(grouped)
    }

    /// `AggOp::None` removes the field's operator.
    pub fn set_aggregation(&self, field: &str, op: AggOp) -> Result<(), StateError> {
        if self.require_field(field)? != FieldKind::Measure {
            return Err(self.reject(StateError::NotMeasure(field.to_string())));
        }
        self.update("set_aggregation", |s| s.aggregations.set(field, op));
        Ok(())
    }

    /// Clears filters only; grouping and aggregations are kept.
    pub fn clear_filters(&self) {
        self.update("clear_filters", |s| s.filters = Default::default());
    }

    pub fn clear_all(&self) {
        self.update("clear_all", |s| *s = ReportState::default());
    }

    pub fn remove_chip(&self, chip: &Chip) {
        self.update("remove_chip", |s| *s = chips::remove_chip(s, chip));
    }

    pub fn chips(&self) -> Vec<Chip> {
        chips::to_chips(&self.snapshot(), &self.schema)
    }

    /// Computes the view of `records` under the current snapshot.
    pub fn view(&self, records: &[Record], options: &ViewOptions, now: NaiveDateTime) -> ReportView {
        build_view(records, &self.snapshot(), &self.schema, options, now)
    }

    /// Replaces the whole state, e.g. from a persisted blob.
    pub fn restore(&self, state: ReportState) {
        let state = state.sanitize(&self.schema);
        info!(target: "report_engine::state", "Restoring report state");
        self.tx.send_replace(Arc::new(state));
    }

    fn update(&self, op: &str, apply: impl FnOnce(&mut ReportState)) {
        self.tx.send_modify(|current| {
            let mut next = (**current).clone();
            apply(&mut next);
            *current = Arc::new(next);
        });
        debug!(target: "report_engine::state", "Applied {}", op);
    }

    fn require_field(&self, field: &str) -> Result<FieldKind, StateError> {
        self.schema
            .kind_of(field)
            .ok_or_else(|| self.reject(StateError::UnknownField(field.to_string())))
    }

    fn require_groupable(&self, field: &str) -> Result<(), StateError> {
        if self.require_field(field)?.is_groupable() {
            Ok(())
        } else {
            Err(self.reject(StateError::NotGroupable(field.to_string())))
        }
    }

    fn reject(&self, err: StateError) -> StateError {
        err.log_error();
        err
    }
}
