use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::errors::ReportError;
use crate::engine::state::ReportState;
use crate::engine::view::SortSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportGroup {
    Sales,
    Finance,
    Operations,
}

impl ReportGroup {
    pub const ALL: [ReportGroup; 3] = [
        ReportGroup::Sales,
        ReportGroup::Finance,
        ReportGroup::Operations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportGroup::Sales => "Sales",
            ReportGroup::Finance => "Finance",
            ReportGroup::Operations => "Operations",
        }
    }
}

impl fmt::Display for ReportGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportGroup::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown report group '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveMode {
    /// Overwrite the report being edited
    #[default]
    Save,
    SaveAsNew,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub name: String,
    pub group: ReportGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mode: SaveMode,
}

impl ReportMeta {
    pub fn new(name: impl Into<String>, group: ReportGroup) -> Self {
        Self {
            name: name.into(),
            group,
            description: None,
            mode: SaveMode::Save,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mode(mut self, mode: SaveMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Payload persisted when a report is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub meta: ReportMeta,
    pub data_source_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sorter: Option<SortSpec>,
    #[serde(flatten)]
    pub state: ReportState,
}

impl ReportDefinition {
    /// Captures `state` under `meta`. The name is trimmed and must not be
    /// blank.
    pub fn build(
        mut meta: ReportMeta,
        data_source_id: &str,
        state: &ReportState,
        sorter: Option<SortSpec>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        meta.name = meta.name.trim().to_string();
        if meta.name.is_empty() {
            return Err(ReportError::MissingName);
        }
        meta.description = meta
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        info!(
            target: "report_engine::report",
            "Built report definition '{}' ({:?}) for {}", meta.name, meta.mode, data_source_id
        );
        Ok(Self {
            meta,
            data_source_id: data_source_id.to_string(),
            created_at,
            sorter,
            state: state.clone(),
        })
    }
}
