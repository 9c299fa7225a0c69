use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::chips::to_chips;
use crate::engine::schema::ReportSchema;

use super::definition::{ReportDefinition, ReportGroup};

/// Tags shown on a report card before the rest collapse into "+N more".
pub const MAX_TAGS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    pub id: String,
    pub name: String,
    pub group: ReportGroup,
    pub created_at: NaiveDate,
    pub created_by: String,
    pub updated_at: NaiveDate,
    pub updated_by: String,
    pub data_source: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SavedReport {
    /// Catalog entry for a freshly saved definition; tags summarise its
    /// state the way chips do.
    pub fn from_definition(
        id: impl Into<String>,
        definition: &ReportDefinition,
        schema: &ReportSchema,
        author: &str,
    ) -> Self {
        let day = definition.created_at.date_naive();
        Self {
            id: id.into(),
            name: definition.meta.name.clone(),
            group: definition.meta.group,
            created_at: day,
            created_by: author.to_string(),
            updated_at: day,
            updated_by: author.to_string(),
            data_source: definition.data_source_id.clone(),
            tags: to_chips(&definition.state, schema)
                .iter()
                .map(|c| c.tag())
                .collect(),
        }
    }

    /// At most `max` tags, followed by `"+N more"` when some were cut.
    pub fn visible_tags(&self, max: usize) -> Vec<String> {
        let mut shown: Vec<String> = self.tags.iter().take(max).cloned().collect();
        let hidden = self.tags.len().saturating_sub(max);
        if hidden > 0 {
            shown.push(format!("+{hidden} more"));
        }
        shown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedReportCatalog {
    reports: Vec<SavedReport>,
}

impl SavedReportCatalog {
    pub fn new(reports: Vec<SavedReport>) -> Self {
        Self { reports }
    }

    /// Parses a catalog blob; unreadable input yields an empty catalog.
    pub fn from_json_str(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            warn!(target: "report_engine::report", "Failed to read saved reports: {}", e);
            Self::default()
        })
    }

    /// Inserts `report`, replacing any entry with the same id.
    pub fn upsert(&mut self, report: SavedReport) {
        match self.reports.iter_mut().find(|r| r.id == report.id) {
            Some(existing) => *existing = report,
            None => self.reports.push(report),
        }
    }

    pub fn get(&self, id: &str) -> Option<&SavedReport> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Reports in one group, or all of them for `None`.
    pub fn by_group(&self, group: Option<ReportGroup>) -> Vec<&SavedReport> {
        self.reports
            .iter()
            .filter(|r| group.is_none_or(|g| r.group == g))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
