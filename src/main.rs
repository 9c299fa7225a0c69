use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use rand::Rng;
use report_engine::engine::aggregate::AggOp;
use report_engine::engine::filter::{DateRange, FieldFilter, NumberRange};
use report_engine::engine::report::{ReportDefinition, ReportGroup, ReportMeta, SaveMode};
use report_engine::engine::schema::ReportSchema;
use report_engine::engine::state::{ReportState, ReportStore, StateFile};
use report_engine::engine::types::Record;
use report_engine::engine::view::{SortSpec, ViewOptions};
use report_engine::logging;
use report_engine::shared::config::CONFIG;
use report_engine::shared::datetime::{DatePreset, TimeConfig};
use tracing::info;

const STATES: [&str; 6] = [
    "California",
    "Texas",
    "New York",
    "Florida",
    "Illinois",
    "Arizona",
];
const CATEGORIES: [&str; 6] = [
    "Electronics",
    "Apparel",
    "Home",
    "Beauty",
    "Sports",
    "Grocery",
];

#[derive(Parser)]
#[command(name = "report_engine")]
#[command(about = "Filter, group and aggregate tabular sales records", long_about = None)]
struct Args {
    /// JSON array of records to report on
    #[arg(short, long, conflicts_with = "mock")]
    records: Option<PathBuf>,

    /// Generate this many demo rows instead of reading a file
    #[arg(long, default_value = "120")]
    mock: usize,

    /// Persisted state file (defaults to report.state_file from config)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Do not read or write the persisted state
    #[arg(long)]
    no_persist: bool,

    /// Start from an empty state
    #[arg(long)]
    clear: bool,

    /// Allowed values of a dimension, e.g. state=Texas,California
    #[arg(short, long = "filter", value_name = "FIELD=V1,V2")]
    filters: Vec<String>,

    /// Inclusive measure bounds, e.g. orders=50..500 or totalSales=1000..
    #[arg(long = "range", value_name = "FIELD=MIN..MAX")]
    ranges: Vec<String>,

    /// Date preset for the date field (today, thisWeek, past30, allTime, ...)
    #[arg(long, conflicts_with_all = ["since", "until", "no_end"])]
    preset: Option<DatePreset>,

    /// First day of the date range (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,

    /// Last day of the date range (YYYY-MM-DD)
    #[arg(long)]
    until: Option<NaiveDate>,

    /// Leave the date range open-ended
    #[arg(long)]
    no_end: bool,

    /// Fields to group by, in order
    #[arg(short, long, value_delimiter = ',')]
    group_by: Option<Vec<String>>,

    /// Aggregation operator per measure, e.g. orders=sum
    #[arg(short, long = "agg", value_name = "FIELD=OP")]
    aggs: Vec<String>,

    /// Leaf sort, e.g. orders:desc
    #[arg(short, long)]
    sort: Option<SortSpec>,

    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Rows per page (defaults to report.page_size from config)
    #[arg(long)]
    page_size: Option<usize>,

    /// Also print a saved-report definition under this name
    #[arg(long)]
    save_report: Option<String>,

    #[arg(long, default_value = "Sales")]
    report_group: ReportGroup,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    save_as_new: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let schema = Arc::new(ReportSchema::sales_demo());
    let time = TimeConfig::from_app_config();
    let now = time.now_local();

    let records = match &args.records {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading records from {}", path.display()))?;
            let json: serde_json::Value = serde_json::from_str(&raw)?;
            Record::list_from_json(&schema, &json)?
        }
        None => mock_records(args.mock, now.date()),
    };
    info!("Loaded {} records", records.len());

    let state_file = (!args.no_persist).then(|| {
        StateFile::new(
            args.state
                .clone()
                .unwrap_or_else(|| PathBuf::from(&CONFIG.report.state_file)),
        )
    });
    let initial = match &state_file {
        Some(file) if !args.clear => file.load(&schema),
        _ => ReportState::default(),
    };
    let store = ReportStore::with_state(Arc::clone(&schema), initial);
    apply_args(&store, &args, &time)?;

    let mut options = ViewOptions::from_config()
        .with_sort(args.sort.clone())
        .with_page(args.page);
    if let Some(size) = args.page_size {
        options.page_size = size;
    }
    let view = store.view(&records, &options, now);
    println!("{}", serde_json::to_string_pretty(&view.to_json())?);

    if let Some(name) = &args.save_report {
        let mut meta = ReportMeta::new(name, args.report_group).with_mode(if args.save_as_new {
            SaveMode::SaveAsNew
        } else {
            SaveMode::Save
        });
        if let Some(d) = &args.description {
            meta = meta.with_description(d);
        }
        let definition = ReportDefinition::build(
            meta,
            &CONFIG.report.data_source_id,
            &store.snapshot(),
            args.sort.clone(),
            Utc::now(),
        )?;
        println!("{}", serde_json::to_string_pretty(&definition)?);
    }

    if let Some(file) = &state_file {
        file.save(&store.snapshot())?;
    }
    Ok(())
}

fn apply_args(store: &ReportStore, args: &Args, time: &TimeConfig) -> anyhow::Result<()> {
    for raw in &args.filters {
        let (field, values) = split_pair(raw)?;
        let values: Vec<&str> = values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        store.set_filter(field, Some(FieldFilter::values(values)))?;
    }

    for raw in &args.ranges {
        let (field, bounds) = split_pair(raw)?;
        store.set_filter(field, Some(FieldFilter::Number(parse_range(bounds)?)))?;
    }

    let date_field = store.schema().date_field().name.clone();
    if let Some(preset) = args.preset {
        let range = DateRange::from_preset(preset, time.now_local(), time.week_start);
        store.set_filter(&date_field, Some(FieldFilter::Date(range)))?;
    } else if args.since.is_some() || args.until.is_some() || args.no_end {
        let range = DateRange::new()
            .with_start(args.since)
            .with_end(args.until)
            .with_no_end(args.no_end);
        store.set_filter(&date_field, Some(FieldFilter::Date(range)))?;
    }

    if let Some(fields) = &args.group_by {
        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
        store.set_group_by(&fields)?;
    }

    for raw in &args.aggs {
        let (field, op) = split_pair(raw)?;
        let op: AggOp = op.parse().map_err(|e: String| anyhow!(e))?;
        store.set_aggregation(field, op)?;
    }
    Ok(())
}

fn split_pair(raw: &str) -> anyhow::Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{raw}'"))
}

fn parse_range(raw: &str) -> anyhow::Result<NumberRange> {
    let Some((min, max)) = raw.split_once("..") else {
        bail!("expected MIN..MAX, got '{raw}'");
    };
    let bound = |s: &str| -> anyhow::Result<Option<f64>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        s.parse::<f64>()
            .map(Some)
            .with_context(|| format!("invalid bound '{s}'"))
    };
    Ok(NumberRange {
        min: bound(min)?,
        max: bound(max)?,
    })
}

fn mock_records(count: usize, today: NaiveDate) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            Record::new((i + 1).to_string())
                .with("state", STATES[i % STATES.len()])
                .with("category", CATEGORIES[i % CATEGORIES.len()])
                .with("totalSales", rng.gen_range(10_000..130_000) as f64)
                .with("orders", rng.gen_range(30..930) as f64)
                .with("lastOrderDate", today - Duration::days(rng.gen_range(0..120)))
        })
        .collect()
}
