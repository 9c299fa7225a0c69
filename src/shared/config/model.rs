use serde::Deserialize;

use crate::shared::datetime::time::TimeConfig;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub time: Option<TimeConfig>,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Rows per page when the caller does not pick a size
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Where the report state mirror lives between sessions
    #[serde(default = "default_state_file")]
    pub state_file: String,
    /// Identifier stamped on saved report definitions
    #[serde(default = "default_data_source_id")]
    pub data_source_id: String,
}

fn default_page_size() -> usize {
    10
}

fn default_state_file() -> String {
    "data/report_state.json".to_string()
}

fn default_data_source_id() -> String {
    "sales-demo".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            state_file: default_state_file(),
            data_source_id: default_data_source_id(),
        }
    }
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("REPORT_ENGINE_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
