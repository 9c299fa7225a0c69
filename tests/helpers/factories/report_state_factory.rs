use crate::engine::aggregate::AggOp;
use crate::engine::filter::FieldFilter;
use crate::engine::state::ReportState;

pub struct ReportStateFactory {
    state: ReportState,
}

impl ReportStateFactory {
    pub fn new() -> Self {
        Self {
            state: ReportState::default(),
        }
    }

    pub fn with_filter(mut self, field: &str, filter: FieldFilter) -> Self {
        self.state.filters.set(field, Some(filter));
        self
    }

    pub fn with_group_by(mut self, fields: &[&str]) -> Self {
        for f in fields {
            self.state.group_by.push(*f);
        }
        self
    }

    pub fn with_agg(mut self, field: &str, op: AggOp) -> Self {
        self.state.aggregations.set(field, op);
        self
    }

    pub fn create(self) -> ReportState {
        self.state
    }
}
