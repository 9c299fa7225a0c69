use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Named shorthand for a date range relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatePreset {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    Ytd,
    Past30,
    Past90,
    AllTime,
}

impl DatePreset {
    pub const ALL: [DatePreset; 10] = [
        DatePreset::Today,
        DatePreset::Yesterday,
        DatePreset::ThisWeek,
        DatePreset::LastWeek,
        DatePreset::ThisMonth,
        DatePreset::LastMonth,
        DatePreset::Ytd,
        DatePreset::Past30,
        DatePreset::Past90,
        DatePreset::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Yesterday => "yesterday",
            DatePreset::ThisWeek => "thisWeek",
            DatePreset::LastWeek => "lastWeek",
            DatePreset::ThisMonth => "thisMonth",
            DatePreset::LastMonth => "lastMonth",
            DatePreset::Ytd => "ytd",
            DatePreset::Past30 => "past30",
            DatePreset::Past90 => "past90",
            DatePreset::AllTime => "allTime",
        }
    }

    /// Human label shown on filter chips
    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Yesterday => "Yesterday",
            DatePreset::ThisWeek => "This Week",
            DatePreset::LastWeek => "Last Week",
            DatePreset::ThisMonth => "This Month",
            DatePreset::LastMonth => "Last Month",
            DatePreset::Ytd => "Year to Date",
            DatePreset::Past30 => "Past 30 Days",
            DatePreset::Past90 => "Past 90 Days",
            DatePreset::AllTime => "All Time",
        }
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatePreset::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown date preset: {s}"))
    }
}

/// Concrete bounds a preset resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub no_end: bool,
}

impl ResolvedRange {
    fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: Some(start_of_day(first)),
            end: Some(end_of_day(last)),
            no_end: false,
        }
    }
}

/// Maps a preset to concrete bounds relative to `now`. Starts are at midnight,
/// ends at 23:59:59; both ends are inclusive.
pub fn resolve_preset(preset: DatePreset, now: NaiveDateTime, week_start: Weekday) -> ResolvedRange {
    let today = now.date();
    match preset {
        DatePreset::Today => ResolvedRange::days(today, today),
        DatePreset::Yesterday => {
            let y = today - Duration::days(1);
            ResolvedRange::days(y, y)
        }
        DatePreset::ThisWeek => {
            let first = week_start_of(today, week_start);
            ResolvedRange::days(first, first + Duration::days(6))
        }
        DatePreset::LastWeek => {
            let first = week_start_of(today - Duration::days(7), week_start);
            ResolvedRange::days(first, first + Duration::days(6))
        }
        DatePreset::ThisMonth => ResolvedRange::days(month_start_of(today), month_end_of(today)),
        DatePreset::LastMonth => {
            let m = today.checked_sub_months(Months::new(1)).unwrap_or(today);
            ResolvedRange::days(month_start_of(m), month_end_of(m))
        }
        DatePreset::Ytd => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            ResolvedRange::days(first, today)
        }
        DatePreset::Past30 => ResolvedRange::days(today - Duration::days(29), today),
        DatePreset::Past90 => ResolvedRange::days(today - Duration::days(89), today),
        DatePreset::AllTime => ResolvedRange {
            start: None,
            end: None,
            no_end: true,
        },
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::seconds(86_399)
}

fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let days_since_week_start = (date.weekday().num_days_from_monday()
        + (7 - week_start.num_days_from_monday()))
        % 7;
    date - Duration::days(days_since_week_start as i64)
}

fn month_start_of(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn month_end_of(date: NaiveDate) -> NaiveDate {
    month_start_of(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}
