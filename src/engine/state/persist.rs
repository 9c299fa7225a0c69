use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::engine::errors::PersistError;
use crate::engine::schema::ReportSchema;

use super::report_state::ReportState;

/// File-backed mirror of the report state.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the mirror. A missing, unreadable or malformed file yields the
    /// empty state; entries that do not fit `schema` are dropped.
    pub fn load(&self, schema: &ReportSchema) -> ReportState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(target: "report_engine::state", "No state file at {:?}", self.path);
                return ReportState::default();
            }
            Err(e) => {
                warn!(
                    target: "report_engine::state",
                    "Failed to read state file {:?}: {}", self.path, e
                );
                return ReportState::default();
            }
        };
        ReportState::from_json_str(&raw).sanitize(schema)
    }

    pub fn save(&self, state: &ReportState) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = state.to_json_string()?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(target: "report_engine::state", "Saved report state to {:?}", self.path);
        Ok(())
    }

    /// Writes every snapshot published on `rx` until the sender is dropped.
    pub async fn mirror(self, mut rx: watch::Receiver<Arc<ReportState>>) {
        info!(target: "report_engine::state", "Mirroring report state to {:?}", self.path);
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            if let Err(e) = self.save(&snapshot) {
                warn!(
                    target: "report_engine::state",
                    "Failed to persist report state: {}", e
                );
            }
        }
    }
}
