use crate::shared::config::CONFIG;
use chrono::{NaiveDateTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Global time configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Timezone used to derive "now" for preset ranges (None = UTC)
    pub timezone: Option<String>,
    /// First day of the week for week-based presets
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            timezone: None,                  // UTC by default
            week_start: default_week_start(), // en locale starts weeks on Sunday
        }
    }
}

impl TimeConfig {
    /// Parse timezone string to chrono_tz::Tz
    pub fn parse_timezone(&self) -> Option<Tz> {
        self.timezone
            .as_ref()
            .and_then(|tz_str| tz_str.parse().ok())
    }

    /// Create from application configuration
    pub fn from_app_config() -> Self {
        CONFIG.time.clone().unwrap_or_default()
    }

    /// Wall-clock time in the configured timezone. Only the binary calls this;
    /// the engine always takes `now` from its caller.
    pub fn now_local(&self) -> NaiveDateTime {
        match self.parse_timezone() {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Utc::now().naive_utc(),
        }
    }
}
